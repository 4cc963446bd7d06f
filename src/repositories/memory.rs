//! In-memory repositories for service and router tests.
//!
//! Both stores share one state so joins see the same categories the
//! category repository writes.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use jiff_diesel::ToDiesel;

use super::{CategoryRepository, ProductRepository, Repositories};
use crate::error::AppResult;
use crate::models::{
    Category, NewCategory, NewProduct, Product, ProductWithCategory, UpdateCategory, UpdateProduct,
};

#[derive(Default)]
struct Store {
    categories: Vec<Category>,
    products: Vec<Product>,
    next_category_id: i32,
    next_product_id: i32,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Store>>,
}

fn now() -> jiff_diesel::DateTime {
    jiff::Zoned::now().datetime().to_diesel()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.inner.lock().expect("memory store poisoned")
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            categories: Arc::new(self.clone()),
            products: Arc::new(self.clone()),
        }
    }

    /// Inserts a product row directly, bypassing any category check.
    pub fn insert_product(&self, category_id: i32, name: &str, price: &str, quantity: i32) -> Product {
        let mut store = self.lock();
        store.next_product_id += 1;
        let product = Product {
            id: store.next_product_id,
            category_id,
            name: name.to_string(),
            price: price.parse().expect("valid decimal"),
            quantity,
            created_at: now(),
            updated_at: now(),
        };
        store.products.push(product.clone());
        product
    }

    fn join(store: &Store, product: &Product) -> ProductWithCategory {
        ProductWithCategory {
            product: product.clone(),
            category: store
                .categories
                .iter()
                .find(|c| c.id == product.category_id)
                .cloned(),
        }
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn create(&self, new_category: NewCategory) -> AppResult<Category> {
        let mut store = self.lock();
        store.next_category_id += 1;
        let category = Category {
            id: store.next_category_id,
            name: new_category.name,
            created_at: now(),
            updated_at: now(),
        };
        store.categories.push(category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, category_id: i32) -> AppResult<Option<Category>> {
        Ok(self.lock().categories.iter().find(|c| c.id == category_id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Category>> {
        Ok(self.lock().categories.clone())
    }

    async fn update(&self, category_id: i32, changes: UpdateCategory) -> AppResult<Option<Category>> {
        let mut store = self.lock();
        Ok(store
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .map(|category| {
                if let Some(name) = changes.name {
                    category.name = name;
                }
                category.updated_at = now();
                category.clone()
            }))
    }

    async fn delete(&self, category_id: i32) -> AppResult<usize> {
        let mut store = self.lock();
        let before = store.categories.len();
        store.categories.retain(|c| c.id != category_id);
        Ok(before - store.categories.len())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create(&self, new_product: NewProduct) -> AppResult<Product> {
        let mut store = self.lock();
        store.next_product_id += 1;
        let product = Product {
            id: store.next_product_id,
            category_id: new_product.category_id,
            name: new_product.name,
            price: new_product.price,
            quantity: new_product.quantity,
            created_at: now(),
            updated_at: now(),
        };
        store.products.push(product.clone());
        Ok(product)
    }

    async fn find_with_category(&self, product_id: i32) -> AppResult<Option<ProductWithCategory>> {
        let store = self.lock();
        Ok(store
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| Self::join(&store, p)))
    }

    async fn list_with_category(&self) -> AppResult<Vec<ProductWithCategory>> {
        let store = self.lock();
        Ok(store.products.iter().map(|p| Self::join(&store, p)).collect())
    }

    async fn list_by_category(&self, category_id: i32) -> AppResult<Vec<Product>> {
        Ok(self
            .lock()
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn update(&self, product_id: i32, changes: UpdateProduct) -> AppResult<Option<Product>> {
        let mut store = self.lock();
        Ok(store
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .map(|product| {
                product.name = changes.name;
                product.price = changes.price;
                product.quantity = changes.quantity;
                if let Some(category_id) = changes.category_id {
                    product.category_id = category_id;
                }
                product.updated_at = now();
                product.clone()
            }))
    }

    async fn delete(&self, product_id: i32) -> AppResult<usize> {
        let mut store = self.lock();
        let before = store.products.len();
        store.products.retain(|p| p.id != product_id);
        Ok(before - store.products.len())
    }
}
