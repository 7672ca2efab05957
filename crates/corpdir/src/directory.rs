//! The directory store.
//!
//! Owns the in-memory employee collection and writes the full collection
//! through the [`PersistenceAdapter`] after every mutation, before returning.

use chrono::Utc;
use tracing::{debug, info};

use crate::employee::{Employee, NewEmployee};
use crate::persistence::PersistenceAdapter;
use crate::search;
use crate::seed;
use crate::storage::KeyValueStore;

/// In-memory employee collection backed by persistent storage.
#[derive(Debug)]
pub struct Directory<S> {
    employees: Vec<Employee>,
    persistence: PersistenceAdapter<S>,
}

impl<S: KeyValueStore> Directory<S> {
    /// Load the stored directory, seeding it from the bundled defaults on first run.
    ///
    /// Seeded records get ids `emp-0`, `emp-1`, ... and are saved immediately.
    pub fn initialize(persistence: PersistenceAdapter<S>) -> Self {
        Self::initialize_with(persistence, seed::default_employees())
    }

    /// Like [`Directory::initialize`], seeding from `defaults` instead.
    pub fn initialize_with(
        mut persistence: PersistenceAdapter<S>,
        defaults: Vec<NewEmployee>,
    ) -> Self {
        if let Some(employees) = persistence.load() {
            debug!("Directory loaded with {} employees", employees.len());
            return Self {
                employees,
                persistence,
            };
        }

        let employees: Vec<Employee> = defaults
            .into_iter()
            .enumerate()
            .map(|(idx, new)| Employee::from_new(format!("emp-{idx}"), new))
            .collect();
        info!("Seeding directory with {} default employees", employees.len());
        persistence.save(&employees);

        Self {
            employees,
            persistence,
        }
    }

    /// All employees, in directory order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Look up an employee by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Number of employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the directory has no employees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Employees matching `query`. See [`search::filter`].
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&Employee> {
        search::filter(&self.employees, query)
    }

    /// Sorted distinct branch names. See [`search::distinct_branches`].
    #[must_use]
    pub fn branches(&self) -> Vec<String> {
        search::distinct_branches(&self.employees)
    }

    /// Borrow the persistence adapter.
    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    /// Mutably borrow the persistence adapter.
    pub fn persistence_mut(&mut self) -> &mut PersistenceAdapter<S> {
        &mut self.persistence
    }

    /// Append a new employee and persist.
    ///
    /// Returns the assigned id, or `None` (and changes nothing) if the name is blank.
    pub fn add(&mut self, new: NewEmployee) -> Option<String> {
        let new = new.normalized();
        if !new.has_name() {
            debug!("Ignoring employee without a name");
            return None;
        }

        let id = self.next_id();
        info!("Adding employee {} ({})", new.name, id);
        self.employees.push(Employee::from_new(id.clone(), new));
        self.persist();
        Some(id)
    }

    /// Remove the employee with `id` and persist.
    ///
    /// Returns `true` if a record was removed. A missing id is a no-op.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.employees.len();
        self.employees.retain(|e| e.id != id);
        let removed = self.employees.len() != before;

        if removed {
            info!("Removed employee {}", id);
        } else {
            debug!("No employee {} to remove", id);
        }
        self.persist();
        removed
    }

    /// Replace the photo of the employee with `id` and persist.
    ///
    /// An empty `photo` clears it. Returns `true` if a record was found.
    pub fn update_photo(&mut self, id: &str, photo: &str) -> bool {
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            debug!("No employee {} to update photo", id);
            self.persist();
            return false;
        };

        employee.photo = (!photo.is_empty()).then(|| photo.to_string());
        info!(
            "{} photo for employee {}",
            if photo.is_empty() { "Cleared" } else { "Updated" },
            id
        );
        self.persist();
        true
    }

    /// Generate an id of the form `emp-<unix millis>` not already in use.
    fn next_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let id = format!("emp-{stamp}");
            if self.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }

    fn persist(&mut self) {
        self.persistence.save(&self.employees);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn new_employee(name: &str, branch: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            branch: Some(branch.to_string()),
            ..NewEmployee::default()
        }
    }

    fn scenario() -> Directory<MemoryStore> {
        Directory::initialize_with(
            PersistenceAdapter::new(MemoryStore::new()),
            vec![new_employee("Alice Smith", "NY"), new_employee("Bob Lee", "LA")],
        )
    }

    fn ids(employees: &[&Employee]) -> Vec<String> {
        employees.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_initialize_seeds_sequential_ids_and_saves() {
        let directory = scenario();
        let ids: Vec<&str> = directory.employees().iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, vec!["emp-0", "emp-1"]);
        assert_eq!(
            directory.persistence().load().as_deref(),
            Some(directory.employees())
        );
    }

    #[test]
    fn test_initialize_uses_stored_copy() {
        let mut adapter = PersistenceAdapter::new(MemoryStore::new());
        let stored = vec![Employee::from_new(
            "emp-9".to_string(),
            NewEmployee::named("Stored Person"),
        )];
        adapter.save(&stored);

        let directory = Directory::initialize(adapter);
        assert_eq!(directory.employees(), stored.as_slice());
    }

    #[test]
    fn test_initialize_with_unreadable_store_reseeds() {
        let mut store = MemoryStore::new();
        store.set_item("companyDirectory", "{broken").unwrap();

        let directory = Directory::initialize(PersistenceAdapter::new(store));
        assert_eq!(directory.len(), seed::default_employees().len());
        assert_eq!(directory.employees()[0].id, "emp-0");
    }

    #[test]
    fn test_add_appends_and_persists() {
        let mut directory = scenario();
        let id = directory.add(new_employee("Carl Jones", "NY")).unwrap();

        assert!(id.starts_with("emp-"));
        assert_eq!(directory.employees().last().unwrap().id, id);
        let stored = directory.persistence().load().unwrap();
        assert_eq!(stored.last().unwrap().name, "Carl Jones");
    }

    #[test]
    fn test_add_blank_name_is_noop() {
        let mut directory = scenario();
        assert!(directory.add(NewEmployee::named("   ")).is_none());
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_add_ids_are_unique() {
        let mut directory = scenario();
        let a = directory.add(NewEmployee::named("A")).unwrap();
        let b = directory.add(NewEmployee::named("B")).unwrap();
        let c = directory.add(NewEmployee::named("C")).unwrap();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_add_then_remove_restores() {
        let mut directory = scenario();
        let before = directory.employees().to_vec();

        let id = directory.add(NewEmployee::named("Temp")).unwrap();
        assert!(directory.remove(&id));

        assert_eq!(directory.employees(), before.as_slice());
        assert_eq!(directory.persistence().load(), Some(before));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut directory = scenario();
        assert!(!directory.remove("emp-404"));
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_remove_last_employee_persists_empty() {
        let mut directory = scenario();
        directory.remove("emp-0");
        directory.remove("emp-1");

        assert!(directory.is_empty());
        assert_eq!(directory.persistence().load(), Some(Vec::new()));
    }

    #[test]
    fn test_update_photo_and_clear() {
        let mut directory = scenario();
        assert!(directory.update_photo("emp-0", "data:image/png;base64,AAAA"));
        assert!(directory.get("emp-0").unwrap().has_photo());

        assert!(directory.update_photo("emp-0", ""));
        assert!(directory.get("emp-0").unwrap().photo.is_none());

        let stored = directory.persistence().load().unwrap();
        assert!(stored[0].photo.is_none());
    }

    #[test]
    fn test_clear_photo_without_photo_is_noop() {
        let mut directory = scenario();
        let before = directory.employees().to_vec();

        directory.update_photo("emp-1", "");
        assert_eq!(directory.employees(), before.as_slice());
    }

    #[test]
    fn test_update_photo_missing_id() {
        let mut directory = scenario();
        assert!(!directory.update_photo("emp-404", "data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let mut directory = Directory::initialize_with(
            PersistenceAdapter::new(MemoryStore::with_quota(200)),
            vec![NewEmployee::named("Alice Smith")],
        );

        directory.update_photo("emp-0", &"A".repeat(500));

        assert!(directory.get("emp-0").unwrap().has_photo());
        let stored = directory.persistence().load().unwrap();
        assert!(stored[0].photo.is_none());
    }

    #[test]
    fn test_concrete_scenario() {
        let mut directory = scenario();
        assert_eq!(ids(&directory.filter("ny")), vec!["emp-0"]);

        let carl = directory.add(new_employee("Carl Jones", "NY")).unwrap();
        assert_eq!(ids(&directory.filter("ny")), vec!["emp-0".to_string(), carl.clone()]);

        directory.remove("emp-1");
        assert_eq!(ids(&directory.filter("")), vec!["emp-0".to_string(), carl]);
    }

    #[test]
    fn test_branches() {
        let directory = scenario();
        assert_eq!(directory.branches(), vec!["LA", "NY"]);
    }
}
