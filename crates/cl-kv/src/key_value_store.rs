use crate::Result as KvResult;

/// String-keyed string storage, the shape of browser local storage.
///
/// Writes replace the whole value. There is no cross-process coordination:
/// the last writer wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> KvResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> KvResult<()>;

    /// Returns whether an entry was removed.
    fn remove(&self, key: &str) -> KvResult<bool>;

    /// Every key currently stored, sorted.
    fn keys(&self) -> KvResult<Vec<String>>;
}
