use crate::catalog::Product;

#[derive(Debug, Clone)]
pub enum AppEvent {
    ProductsLoaded(Vec<Product>),
    ProductsFailed(String),
    CategoriesLoaded(Vec<String>),
    CategoriesFailed(String),
    ProductCreated(Product),
    CreateFailed(String),
    ProductUpdated { id: u64, title: String },
    UpdateFailed { id: u64, message: String },
}
