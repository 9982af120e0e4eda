use crate::db::{DbConnection, DbPool};
use crate::domain::supplier::{NewSupplier, Supplier};
use crate::domain::types::SupplierId;

pub mod errors;
pub mod supplier;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for supplier entities.
pub trait SupplierReader {
    /// Retrieve a supplier by its identifier.
    fn get_supplier_by_id(&self, id: SupplierId) -> RepositoryResult<Option<Supplier>>;
}

/// Write operations for supplier entities.
pub trait SupplierWriter {
    /// Persist a new supplier and return the stored record with its id.
    fn create_supplier(&self, supplier: &NewSupplier) -> RepositoryResult<Supplier>;
}
