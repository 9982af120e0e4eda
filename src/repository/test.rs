use std::sync::Mutex;

use crate::domain::supplier::{NewSupplier, Supplier};
use crate::domain::types::SupplierId;
use crate::repository::{RepositoryError, RepositoryResult, SupplierReader, SupplierWriter};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    suppliers: Mutex<Vec<Supplier>>,
    fail_create: bool,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose writes always fail, for persistence-error paths.
    pub fn failing() -> Self {
        Self {
            suppliers: Mutex::new(Vec::new()),
            fail_create: true,
        }
    }

    pub fn count(&self) -> usize {
        self.suppliers.lock().unwrap().len()
    }

    pub fn latest(&self) -> Option<Supplier> {
        self.suppliers.lock().unwrap().last().cloned()
    }
}

impl SupplierReader for TestRepository {
    fn get_supplier_by_id(&self, id: SupplierId) -> RepositoryResult<Option<Supplier>> {
        Ok(self
            .suppliers
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }
}

impl SupplierWriter for TestRepository {
    fn create_supplier(&self, supplier: &NewSupplier) -> RepositoryResult<Supplier> {
        if self.fail_create {
            return Err(RepositoryError::Corrupted("simulated write failure".into()));
        }

        let mut suppliers = self.suppliers.lock().unwrap();
        let id = SupplierId::new(suppliers.len() as i32 + 1).expect("non-zero id");
        let stored = Supplier {
            id,
            business_name: supplier.business_name.clone(),
            company_number: supplier.company_number.clone(),
            contact_name: supplier.contact_name.clone(),
            phone: supplier.phone.clone(),
            email: supplier.email.clone(),
            about: supplier.about.clone(),
            categories: supplier.categories.clone(),
            activity_areas: supplier.activity_areas.clone(),
            website: supplier.website.clone(),
            instagram: supplier.instagram.clone(),
            address: supplier.address.clone(),
            logo_url: supplier.logo_url.clone(),
            product_image_urls: supplier.product_image_urls.clone(),
            catalog: supplier.catalog.clone(),
            status: supplier.status,
            created_at: supplier.created_at,
        };
        suppliers.push(stored.clone());
        Ok(stored)
    }
}
