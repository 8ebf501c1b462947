use crate::core::library::{LibraryResult, ResourceCategory, ResourceStatus};
use crate::resources::domain::model::ResourceEntity;

pub mod article;
pub mod book;
pub mod digital;
pub mod model;
pub mod thesis;

// CatalogService defines the catalog operations of the library manager.
pub trait CatalogService {
    fn add_resource(&mut self, resource: ResourceEntity) -> LibraryResult<()>;
    fn update_resource(&mut self, resource: ResourceEntity) -> LibraryResult<()>;
    fn remove_resource(&mut self, id: &str) -> LibraryResult<bool>;
    fn change_resource_status(&mut self, id: &str, status: ResourceStatus) -> LibraryResult<()>;
    fn find_resource_by_id(&self, id: &str) -> Option<&ResourceEntity>;
    fn all_resources(&self) -> Vec<&ResourceEntity>;
    fn search_resources(&self, query: &str) -> Vec<&ResourceEntity>;
    fn filter_by_category(&self, category: ResourceCategory) -> Vec<&ResourceEntity>;
    fn filter_by_status(&self, status: ResourceStatus) -> Vec<&ResourceEntity>;
    fn available_resources(&self) -> Vec<&ResourceEntity>;
}
