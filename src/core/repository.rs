use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

// Repository abstracts an id-keyed collection of entities owned by the library manager.
pub trait Repository<Entity: Identifiable> {
    // create an entity
    fn create(&mut self, entity: Entity) -> LibraryResult<()>;

    // updates an entity
    fn update(&mut self, entity: Entity) -> LibraryResult<()>;

    // get an entity
    fn get(&self, id: &str) -> Option<&Entity>;

    // get an entity for mutation
    fn get_mut(&mut self, id: &str) -> Option<&mut Entity>;

    // delete an entity
    fn delete(&mut self, id: &str) -> Option<Entity>;

    // find by predicate, in insertion order
    fn query(&self, predicate: &dyn Fn(&Entity) -> bool) -> Vec<&Entity>;

    fn all(&self) -> Vec<&Entity>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}

// MemoryRepository keeps entities in insertion order and scans them linearly by id.
#[derive(Debug, Clone)]
pub struct MemoryRepository<Entity> {
    group: String,
    entities: Vec<Entity>,
}

impl<Entity: Identifiable> MemoryRepository<Entity> {
    pub fn new(group: &str) -> Self {
        MemoryRepository {
            group: group.to_string(),
            entities: vec![],
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }
}

impl<Entity: Identifiable> Repository<Entity> for MemoryRepository<Entity> {
    fn create(&mut self, entity: Entity) -> LibraryResult<()> {
        let id = entity.id();
        if self.position(id.as_str()).is_some() {
            return Err(LibraryError::duplicate_key(format!("{} with id {} already exists",
                                                           self.group, id).as_str()));
        }
        self.entities.push(entity);
        Ok(())
    }

    fn update(&mut self, entity: Entity) -> LibraryResult<()> {
        let id = entity.id();
        match self.position(id.as_str()) {
            Some(ndx) => {
                self.entities[ndx] = entity;
                Ok(())
            }
            None => {
                Err(LibraryError::not_found(format!("{} with id {} not found",
                                                    self.group, id).as_str()))
            }
        }
    }

    fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    fn delete(&mut self, id: &str) -> Option<Entity> {
        self.position(id).map(|ndx| self.entities.remove(ndx))
    }

    fn query(&self, predicate: &dyn Fn(&Entity) -> bool) -> Vec<&Entity> {
        self.entities.iter().filter(|e| predicate(*e)).collect()
    }

    fn all(&self) -> Vec<&Entity> {
        self.entities.iter().collect()
    }

    fn len(&self) -> usize {
        self.entities.len()
    }

    fn clear(&mut self) {
        self.entities.clear();
    }
}
