use diesel::prelude::*;

use crate::domain::supplier::{NewSupplier, Supplier};
use crate::domain::types::SupplierId;
use crate::models::supplier::{NewSupplier as NewSupplierRow, Supplier as SupplierRow};
use crate::repository::{DieselRepository, RepositoryResult, SupplierReader, SupplierWriter};

impl SupplierReader for DieselRepository {
    fn get_supplier_by_id(&self, id: SupplierId) -> RepositoryResult<Option<Supplier>> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;

        let row = suppliers::table
            .filter(suppliers::id.eq(id.get()))
            .first::<SupplierRow>(&mut conn)
            .optional()?;

        row.map(Supplier::try_from).transpose().map_err(Into::into)
    }
}

impl SupplierWriter for DieselRepository {
    fn create_supplier(&self, supplier: &NewSupplier) -> RepositoryResult<Supplier> {
        use crate::schema::suppliers;

        let mut conn = self.conn()?;

        let row = NewSupplierRow::try_from(supplier)?;

        let inserted = diesel::insert_into(suppliers::table)
            .values(&row)
            .get_result::<SupplierRow>(&mut conn)?;

        Supplier::try_from(inserted).map_err(Into::into)
    }
}
