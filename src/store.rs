
use tracing::{debug, info, warn};

use crate::{
    model::{validate, StudentForm, StudentRecord, ValidationError},
    storage::Storage,
    Error, IndexError, Result,
};

pub const DEFAULT_KEY: &str = "students";

// The roster in memory and its persisted copy under `key`. Every successful
// mutation rewrites the whole entry; a failed write undoes the mutation.
pub struct RosterStore<S: Storage> {
    storage: S,
    key: String,
    students: Vec<StudentRecord>,
}

impl<S: Storage> RosterStore<S> {
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let students = load(&storage, &key);
        info!("{:<12} - {} students from \"{}\"", "LOAD", students.len(), key);

        Self {
            storage,
            key,
            students,
        }
    }

    pub fn validate(
        &self,
        form: &StudentForm,
    ) -> core::result::Result<StudentRecord, ValidationError> {
        validate(form)
    }

    pub fn add(&mut self, form: &StudentForm) -> Result<()> {
        let student = validate(form)?;
        self.students.push(student);

        if let Err(e) = self.persist() {
            self.students.pop();
            return Err(e);
        }
        debug!("{:<12} - index {}", "ADD", self.students.len() - 1);
        Ok(())
    }

    pub fn update(&mut self, index: usize, form: &StudentForm) -> Result<()> {
        self.check_index(index)?;
        let student = validate(form)?;
        let previous = std::mem::replace(&mut self.students[index], student);

        if let Err(e) = self.persist() {
            self.students[index] = previous;
            return Err(e);
        }
        debug!("{:<12} - index {index}", "UPDATE");
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<StudentRecord> {
        self.check_index(index)?;
        let removed = self.students.remove(index);

        if let Err(e) = self.persist() {
            self.students.insert(index, removed);
            return Err(e);
        }
        debug!("{:<12} - index {index}", "DELETE");
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> core::result::Result<&StudentRecord, IndexError> {
        self.students.get(index).ok_or(IndexError {
            index,
            len: self.students.len(),
        })
    }

    pub fn list(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn check_index(&self, index: usize) -> core::result::Result<(), IndexError> {
        self.get(index).map(|_| ())
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.students).map_err(Error::Encode)?;
        self.storage
            .set_item(&self.key, &json)
            .map_err(Error::PersistenceWrite)
    }
}

// Anything that is not a JSON array counts as an empty roster. Entries that
// fail to decode or validate are dropped one by one so the rest survive.
fn load<S: Storage>(storage: &S, key: &str) -> Vec<StudentRecord> {
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("{:<12} - nothing stored under \"{key}\"", "LOAD");
            return vec![];
        }
        Err(e) => {
            warn!("Failed to read roster, starting empty: {e}");
            return vec![];
        }
    };

    let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Stored roster under \"{key}\" is malformed, starting empty: {e}");
            return vec![];
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let form: StudentForm = match serde_json::from_value(entry) {
                Ok(form) => form,
                Err(e) => {
                    warn!("Dropping stored student {i}: {e}");
                    return None;
                }
            };
            match validate(&form) {
                Ok(student) => Some(student),
                Err(e) => {
                    warn!("Dropping stored student {i}: {} ({e})", e.rule.as_ref());
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::ValidationRule,
        storage::{self, FileStorage, MemoryStorage},
    };

    fn ann() -> StudentForm {
        StudentForm::new("Ann Lee", "101", "a@x.com", "1234567890")
    }

    fn bob() -> StudentForm {
        StudentForm::new("Bob Stone", "102", "b@x.com", "0987654321")
    }

    fn cat() -> StudentForm {
        StudentForm::new("Cat Moss", "103", "c@x.com", "5555555555")
    }

    fn store_with(forms: &[StudentForm]) -> RosterStore<MemoryStorage> {
        let mut store = RosterStore::open(MemoryStorage::new(), DEFAULT_KEY);
        for form in forms {
            store.add(form).unwrap();
        }
        store
    }

    fn stored_json(store: &RosterStore<MemoryStorage>) -> Option<String> {
        store.storage().get_item(DEFAULT_KEY).unwrap()
    }

    fn stored(raw: &str) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        storage.set_item(DEFAULT_KEY, raw).unwrap();
        storage
    }

    fn is_rule(err: &Error, expected: ValidationRule) -> bool {
        matches!(err, Error::Validation(ValidationError { rule }) if *rule == expected)
    }

    // Counts successful writes and refuses any once `writes_left` hits zero.
    struct FlakyStorage {
        inner: MemoryStorage,
        writes_left: usize,
        writes: usize,
    }

    impl FlakyStorage {
        fn new(writes_left: usize) -> Self {
            Self {
                inner: MemoryStorage::new(),
                writes_left,
                writes: 0,
            }
        }
    }

    impl Storage for FlakyStorage {
        fn get_item(&self, key: &str) -> storage::Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> storage::Result<()> {
            if self.writes_left == 0 {
                return Err(storage::Error::Io {
                    key: key.to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.writes_left -= 1;
            self.writes += 1;
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> storage::Result<()> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn add_to_empty_roster() {
        let mut store = store_with(&[]);
        assert!(store.is_empty());

        store.add(&ann()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0], validate(&ann()).unwrap());
    }

    #[test]
    fn add_appends_trimmed_record() {
        let mut store = store_with(&[ann()]);
        let padded = StudentForm::new(" Bob Stone ", "102 ", " b@x.com", "0987654321 ");
        store.add(&padded).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap(), &validate(&bob()).unwrap());
    }

    #[test]
    fn add_rejects_digit_in_name() {
        let mut store = store_with(&[]);
        let form = StudentForm::new("A1", "101", "a@x.com", "1234567890");
        let err = store.add(&form).unwrap_err();

        assert!(is_rule(&err, ValidationRule::InvalidName));
        assert!(store.is_empty());
        assert_eq!(stored_json(&store), None);
    }

    #[test]
    fn add_rejects_short_contact() {
        let mut store = store_with(&[ann()]);
        let before = stored_json(&store);
        let form = StudentForm::new("Ann", "101", "a@x.com", "12345");
        let err = store.add(&form).unwrap_err();

        assert!(is_rule(&err, ValidationRule::InvalidContact));
        assert_eq!(store.len(), 1);
        assert_eq!(stored_json(&store), before);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = store_with(&[ann(), bob(), cat()]);
        let edited = StudentForm::new("Bobby Stone", "202", "bobby@x.com", "1111111111");

        store.update(1, &edited).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1).unwrap(), &validate(&edited).unwrap());
        assert_eq!(store.get(0).unwrap(), &validate(&ann()).unwrap());
        assert_eq!(store.get(2).unwrap(), &validate(&cat()).unwrap());
    }

    #[test]
    fn update_out_of_range() {
        let mut store = store_with(&[ann(), bob()]);
        let before = stored_json(&store);

        let err = store.update(5, &cat()).unwrap_err();

        assert!(matches!(err, Error::Index(IndexError { index: 5, len: 2 })));
        let expected = [validate(&ann()).unwrap(), validate(&bob()).unwrap()];
        assert_eq!(store.list(), &expected);
        assert_eq!(stored_json(&store), before);
    }

    #[test]
    fn update_index_checked_before_form() {
        let mut store = store_with(&[ann()]);
        let err = store.update(1, &StudentForm::default()).unwrap_err();
        assert!(matches!(err, Error::Index(_)));
    }

    #[test]
    fn update_rejects_invalid_form() {
        let mut store = store_with(&[ann()]);
        let form = StudentForm::new("Ann", "abc", "a@x.com", "1234567890");
        let err = store.update(0, &form).unwrap_err();

        assert!(is_rule(&err, ValidationRule::InvalidId));
        assert_eq!(store.get(0).unwrap(), &validate(&ann()).unwrap());
    }

    #[test]
    fn delete_first_of_two() {
        let mut store = store_with(&[ann(), bob()]);

        let removed = store.delete(0).unwrap();

        assert_eq!(removed, validate(&ann()).unwrap());
        assert_eq!(store.list(), &[validate(&bob()).unwrap()]);
    }

    #[test]
    fn delete_shifts_later_elements() {
        let mut store = store_with(&[ann(), bob(), cat()]);
        store.delete(1).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().name(), "Ann Lee");
        assert_eq!(store.get(1).unwrap().name(), "Cat Moss");
    }

    #[test]
    fn delete_out_of_range() {
        let mut store = store_with(&[ann()]);
        let err = store.delete(1).unwrap_err();
        assert!(matches!(err, Error::Index(IndexError { index: 1, len: 1 })));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_out_of_range() {
        let store = store_with(&[]);
        assert_eq!(store.get(0), Err(IndexError { index: 0, len: 0 }));
    }

    #[test]
    fn validate_does_not_touch_roster() {
        let store = store_with(&[ann()]);
        let bad = StudentForm::new("Ann", "101", "", "1234567890");

        let first = store.validate(&bad).unwrap_err();
        let second = store.validate(&bad).unwrap_err();

        assert_eq!(first, second);
        assert_eq!(first.rule, ValidationRule::EmptyField);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn one_write_per_successful_mutation() {
        let mut store = RosterStore::open(FlakyStorage::new(usize::MAX), DEFAULT_KEY);

        store.add(&ann()).unwrap();
        assert_eq!(store.storage().writes, 1);
        store.add(&bob()).unwrap();
        assert_eq!(store.storage().writes, 2);
        store.update(0, &cat()).unwrap();
        assert_eq!(store.storage().writes, 3);
        store.delete(1).unwrap();
        assert_eq!(store.storage().writes, 4);
    }

    #[test]
    fn rejected_calls_never_write() {
        let mut store = RosterStore::open(FlakyStorage::new(usize::MAX), DEFAULT_KEY);
        store.add(&ann()).unwrap();

        let bad = StudentForm::new("Ann", "101", "a@x.com", "12");
        assert!(store.add(&bad).is_err());
        assert!(store.update(0, &bad).is_err());
        assert!(store.update(3, &bob()).is_err());
        assert!(store.delete(3).is_err());
        assert!(store.validate(&bad).is_err());

        assert_eq!(store.storage().writes, 1);
    }

    #[test]
    fn opening_never_writes() {
        let store = RosterStore::open(FlakyStorage::new(usize::MAX), DEFAULT_KEY);
        assert_eq!(store.storage().writes, 0);
    }

    #[test]
    fn persisted_layout() {
        let store = store_with(&[ann()]);
        let raw = stored_json(&store).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json, serde_json::json!([{
            "name": "Ann Lee",
            "sid": "101",
            "email": "a@x.com",
            "contact": "1234567890",
        }]));
    }

    #[test]
    fn reopen_matches_memory() {
        let mut store = store_with(&[ann(), bob(), cat()]);
        store.delete(0).unwrap();
        store.update(1, &ann()).unwrap();
        store.add(&StudentForm::new("Dee", "104", "d@x.com", "4444444444")).unwrap();
        let expected = store.list().to_vec();

        let reopened = RosterStore::open(store.into_storage(), DEFAULT_KEY);
        assert_eq!(reopened.list(), expected.as_slice());
    }

    #[test]
    fn reopen_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RosterStore::open(FileStorage::new(dir.path()), DEFAULT_KEY);
        store.add(&ann()).unwrap();
        store.add(&bob()).unwrap();
        let expected = store.list().to_vec();
        drop(store);

        let reopened = RosterStore::open(FileStorage::new(dir.path()), DEFAULT_KEY);
        assert_eq!(reopened.list(), expected.as_slice());
    }

    #[test]
    fn keys_are_independent() {
        let mut store = RosterStore::open(MemoryStorage::new(), "class_a");
        store.add(&ann()).unwrap();

        let other = RosterStore::open(store.into_storage(), "class_b");
        assert!(other.is_empty());
    }

    #[test]
    fn open_tolerates_malformed_data() {
        for raw in ["", "not json", "null", "{}", r#"[{"name": 5}]"#, "[1, 2]"] {
            let store = RosterStore::open(stored(raw), DEFAULT_KEY);
            assert!(store.is_empty(), "expected empty roster for {raw:?}");
        }
    }

    #[test]
    fn open_drops_invalid_entries() {
        let storage = stored(
            r#"[
                {"name":"Ann Lee","sid":"101","email":"a@x.com","contact":"1234567890"},
                {"name":"R2D2","sid":"1","email":"r@x.com","contact":"1234567890"},
                {"name":"Bob Stone","sid":"102","email":"b@x.com"}
            ]"#,
        );

        let store = RosterStore::open(storage, DEFAULT_KEY);
        assert_eq!(store.list(), &[validate(&ann()).unwrap()]);
    }

    #[test]
    fn mistyped_entry_does_not_cost_the_rest() {
        let storage = stored(
            r#"[
                {"name":"Ann Lee","sid":"101","email":"a@x.com","contact":"1234567890"},
                {"name":"Bob","sid":102,"email":"b@x.com","contact":"0987654321"},
                "stray"
            ]"#,
        );

        let mut store = RosterStore::open(storage, DEFAULT_KEY);
        assert_eq!(store.list(), &[validate(&ann()).unwrap()]);

        store.add(&cat()).unwrap();
        let reopened = RosterStore::open(store.into_storage(), DEFAULT_KEY);
        let expected = [validate(&ann()).unwrap(), validate(&cat()).unwrap()];
        assert_eq!(reopened.list(), &expected);
    }

    #[test]
    fn open_tolerates_read_error() {
        let store = RosterStore::open(FileStorage::new("/unused"), "bad/key");
        assert!(store.is_empty());
    }

    #[test]
    fn failed_write_rolls_back_add() {
        let mut store = RosterStore::open(FlakyStorage::new(1), DEFAULT_KEY);
        store.add(&ann()).unwrap();

        let err = store.add(&bob()).unwrap_err();

        assert!(matches!(err, Error::PersistenceWrite(_)));
        assert_eq!(store.list(), &[validate(&ann()).unwrap()]);
    }

    #[test]
    fn failed_write_rolls_back_update_and_delete() {
        let mut store = RosterStore::open(FlakyStorage::new(2), DEFAULT_KEY);
        store.add(&ann()).unwrap();
        store.add(&bob()).unwrap();
        let expected = store.list().to_vec();

        assert!(matches!(store.update(0, &cat()), Err(Error::PersistenceWrite(_))));
        assert_eq!(store.list(), expected.as_slice());

        assert!(matches!(store.delete(0), Err(Error::PersistenceWrite(_))));
        assert_eq!(store.list(), expected.as_slice());

        let reopened = RosterStore::open(store.into_storage(), DEFAULT_KEY);
        assert_eq!(reopened.list(), expected.as_slice());
    }
}
