use std::{collections::BTreeMap, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// JSON file-backed document collection.
///
/// Documents live in memory in key order and the whole collection is
/// rewritten after every mutation. Writes go to a sibling temp file that is
/// renamed over the target, so a crash never leaves a truncated file behind.
pub struct JsonCollectionFile<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonCollectionFile<K, V>
where
    K: Ord + Clone + serde::Serialize + serde::de::DeserializeOwned,
    V: Clone + serde::Serialize + serde::de::DeserializeOwned,
{
    /// Open the collection at `path`, creating an empty file if missing.
    /// An existing file that fails to parse is an error rather than silently emptied.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| ServiceError::Db(e.to_string()))?;
            }
        }

        let docs: Vec<(K, V)> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Db(format!("{}: {}", file_path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(ServiceError::Db(e.to_string())),
        };

        let store = Self { inner: RwLock::new(docs.into_iter().collect()), file_path };
        {
            let map = store.inner.read().await;
            store.persist(&map).await?;
        }
        Ok(Arc::new(store))
    }

    async fn persist(&self, map: &BTreeMap<K, V>) -> Result<(), ServiceError> {
        let entries: Vec<(&K, &V)> = map.iter().collect();
        let data = serde_json::to_vec(&entries).map_err(|e| ServiceError::Db(e.to_string()))?;
        let tmp = self.file_path.with_extension("json.tmp");
        fs::write(&tmp, data).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        fs::rename(&tmp, &self.file_path).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    /// Documents matching `pred`, in key order.
    pub async fn filter<F>(&self, pred: F) -> Vec<V>
    where
        F: Fn(&V) -> bool,
    {
        let map = self.inner.read().await;
        map.values().filter(|v| pred(v)).cloned().collect()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert a document under a fresh key and persist. Returns `false`
    /// without writing if the key is already taken.
    pub async fn insert_new(&self, key: K, value: V) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        if map.contains_key(&key) {
            return Ok(false);
        }
        map.insert(key.clone(), value);
        if let Err(e) = self.persist(&map).await {
            map.remove(&key);
            return Err(e);
        }
        Ok(true)
    }

    /// Remove the first document (in key order) matching `pred` and persist.
    pub async fn remove_first<F>(&self, pred: F) -> Result<Option<V>, ServiceError>
    where
        F: Fn(&V) -> bool,
    {
        let mut map = self.inner.write().await;
        let Some(key) = map.iter().find(|(_, v)| pred(v)).map(|(k, _)| k.clone()) else {
            return Ok(None);
        };
        let removed = map.remove(&key);
        if let Err(e) = self.persist(&map).await {
            if let Some(v) = removed {
                map.insert(key, v);
            }
            return Err(e);
        }
        Ok(removed)
    }
}
