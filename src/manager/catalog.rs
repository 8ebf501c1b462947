use std::collections::HashMap;
use chrono::Datelike;
use tracing::{info, warn};
use crate::core::domain::Identifiable;
use crate::core::events::DomainEventType;
use crate::core::library::{LibraryError, LibraryResult, ResourceCategory, ResourceStatus};
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;
use crate::manager::LibraryManager;
use crate::resources::domain::CatalogService;
use crate::resources::domain::model::ResourceEntity;
use crate::resources::dto::ResourceDto;

impl CatalogService for LibraryManager {
    fn add_resource(&mut self, resource: ResourceEntity) -> LibraryResult<()> {
        ResourceEntity::validate_publication_year(resource.publication_year(), self.now().year())?;
        let dto = ResourceDto::from(&resource);
        let id = resource.id();
        let kind = resource.resource_type();
        self.resources.create(resource)?;
        info!(resource_id = id.as_str(), kind, "added resource");
        self.publish(DomainEventType::ResourceAdded, &id,
                     HashMap::from([("resource_id".to_string(), id.clone())]), &dto);
        Ok(())
    }

    fn update_resource(&mut self, mut resource: ResourceEntity) -> LibraryResult<()> {
        ResourceEntity::validate_publication_year(resource.publication_year(), self.now().year())?;
        let id = resource.id();
        let status = self.resources.get(&id)
            .map(|existing| existing.status())
            .ok_or_else(|| LibraryError::not_found(format!("resource {} not found", id).as_str()))?;
        // lending state is owned by the manager, never by the edited copy
        resource.set_status(status);
        self.resources.update(resource)?;
        info!(resource_id = id.as_str(), "updated resource");
        Ok(())
    }

    fn remove_resource(&mut self, id: &str) -> LibraryResult<bool> {
        let borrowed = match self.resources.get(id) {
            Some(resource) => resource.status() == ResourceStatus::Borrowed,
            None => return Ok(false),
        };
        let on_loan = !self.active_loans.query(&|l: &LoanEntity| l.resource_id() == id).is_empty();
        if borrowed || on_loan {
            return Err(LibraryError::in_use(format!("resource {} is currently borrowed", id).as_str(),
                                            Some("Borrowed".to_string())));
        }
        match self.resources.delete(id) {
            Some(removed) => {
                info!(resource_id = id, "removed resource");
                self.publish(DomainEventType::ResourceRemoved, id,
                             HashMap::from([("resource_id".to_string(), id.to_string())]),
                             &ResourceDto::from(&removed));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn change_resource_status(&mut self, id: &str, status: ResourceStatus) -> LibraryResult<()> {
        if status == ResourceStatus::Borrowed {
            return Err(LibraryError::validation("resources become borrowed only through a loan",
                                                Some("status".to_string())));
        }
        let resource = self.resources.get_mut(id)
            .ok_or_else(|| LibraryError::not_found(format!("resource {} not found", id).as_str()))?;
        if resource.status() == ResourceStatus::Borrowed {
            return Err(LibraryError::in_use(format!("resource {} is currently borrowed", id).as_str(),
                                            Some("Borrowed".to_string())));
        }
        let previous = resource.status();
        resource.set_status(status);
        if previous != status {
            info!(resource_id = id, from = %previous, to = %status, "changed resource status");
        } else {
            warn!(resource_id = id, status = %status, "resource status unchanged");
        }
        Ok(())
    }

    fn find_resource_by_id(&self, id: &str) -> Option<&ResourceEntity> {
        self.resources.get(id)
    }

    fn all_resources(&self) -> Vec<&ResourceEntity> {
        self.resources.all()
    }

    fn search_resources(&self, query: &str) -> Vec<&ResourceEntity> {
        if query.trim().is_empty() {
            return self.resources.all();
        }
        self.resources.query(&|r: &ResourceEntity| r.matches(query))
    }

    fn filter_by_category(&self, category: ResourceCategory) -> Vec<&ResourceEntity> {
        self.resources.query(&|r: &ResourceEntity| r.category() == category)
    }

    fn filter_by_status(&self, status: ResourceStatus) -> Vec<&ResourceEntity> {
        self.resources.query(&|r: &ResourceEntity| r.status() == status)
    }

    fn available_resources(&self) -> Vec<&ResourceEntity> {
        self.filter_by_status(ResourceStatus::Available)
    }
}
