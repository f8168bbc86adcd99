// talat_core/src/stores/memory.rs

//! In-memory collaborator implementations. These are the default backends
//! for tests and examples, with knobs to inject the failure modes the
//! recovery paths care about: unreachable collections, refused writes,
//! credential-less object storage.

use crate::models::{CartLine, OwnerKey, Product};
use crate::stores::document::{DocumentStore, ListFilter};
use crate::stores::local::CartStore;
use crate::stores::object::ObjectStorage;
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

type Collections = HashMap<String, BTreeMap<String, Value>>;

#[derive(Default)]
pub struct MemoryDocumentStore {
  collections: RwLock<Collections>,
  unreachable: RwLock<HashSet<String>>,
  refused_updates: RwLock<HashSet<String>>,
  refused_sets: RwLock<HashSet<String>>,
}

impl MemoryDocumentStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seeds a catalog collection from typed products, keyed by product id.
  pub fn seed_products(&self, collection: &str, products: &[Product]) {
    let mut collections = self.collections.write();
    let target = collections.entry(collection.to_string()).or_default();
    for product in products {
      let doc = serde_json::to_value(product).expect("Product serializes");
      target.insert(product.id.to_string(), doc);
    }
  }

  pub fn insert_document(&self, collection: &str, id: &str, value: Value) {
    self
      .collections
      .write()
      .entry(collection.to_string())
      .or_default()
      .insert(id.to_string(), value);
  }

  /// Every subsequent call touching `collection` fails, simulating an
  /// unreachable backing store.
  pub fn make_unreachable(&self, collection: &str) {
    self.unreachable.write().insert(collection.to_string());
  }

  pub fn restore_reachability(&self, collection: &str) {
    self.unreachable.write().remove(collection);
  }

  /// The next and all further `update_document` calls for this document
  /// fail, leaving the document untouched.
  pub fn refuse_updates(&self, collection: &str, id: &str) {
    self.refused_updates.write().insert(doc_key(collection, id));
  }

  /// All `set_document` calls into `collection` fail.
  pub fn refuse_sets(&self, collection: &str) {
    self.refused_sets.write().insert(collection.to_string());
  }

  /// Test inspection helper.
  pub fn document(&self, collection: &str, id: &str) -> Option<Value> {
    self.collections.read().get(collection)?.get(id).cloned()
  }

  pub fn document_count(&self, collection: &str) -> usize {
    self.collections.read().get(collection).map_or(0, BTreeMap::len)
  }

  fn check_reachable(&self, collection: &str) -> anyhow::Result<()> {
    if self.unreachable.read().contains(collection) {
      bail!("document store unreachable for collection '{}'", collection);
    }
    Ok(())
  }
}

fn doc_key(collection: &str, id: &str) -> String {
  format!("{}/{}", collection, id)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
  async fn get_document(&self, collection: &str, id: &str) -> anyhow::Result<Option<Value>> {
    self.check_reachable(collection)?;
    Ok(self.collections.read().get(collection).and_then(|c| c.get(id)).cloned())
  }

  async fn list_documents(&self, collection: &str, filter: &ListFilter) -> anyhow::Result<Vec<Value>> {
    self.check_reachable(collection)?;
    let collections = self.collections.read();
    let Some(docs) = collections.get(collection) else {
      return Ok(Vec::new());
    };
    Ok(docs.values().filter(|doc| filter.matches(doc)).cloned().collect())
  }

  async fn set_document(&self, collection: &str, id: &str, value: Value) -> anyhow::Result<()> {
    self.check_reachable(collection)?;
    if self.refused_sets.read().contains(collection) {
      bail!("document store refused write to '{}'", doc_key(collection, id));
    }
    self.insert_document(collection, id, value);
    Ok(())
  }

  async fn update_document(&self, collection: &str, id: &str, partial: Value) -> anyhow::Result<()> {
    self.check_reachable(collection)?;
    if self.refused_updates.read().contains(&doc_key(collection, id)) {
      bail!("document store refused update of '{}'", doc_key(collection, id));
    }
    let mut collections = self.collections.write();
    let doc = collections
      .get_mut(collection)
      .and_then(|c| c.get_mut(id))
      .ok_or_else(|| anyhow!("cannot update missing document '{}'", doc_key(collection, id)))?;
    let (Some(target), Value::Object(fields)) = (doc.as_object_mut(), partial) else {
      bail!("update_document requires object documents and an object patch");
    };
    for (field, value) in fields {
      target.insert(field, value);
    }
    Ok(())
  }
}

struct StoredObject {
  content_type: String,
  len: usize,
}

/// Object storage stand-in. Built `without_credentials`, every upload
/// fails the way the real bucket does when its credentials are missing.
pub struct MemoryObjectStorage {
  has_credentials: bool,
  objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryObjectStorage {
  pub fn new() -> Self {
    MemoryObjectStorage {
      has_credentials: true,
      objects: RwLock::new(HashMap::new()),
    }
  }

  pub fn without_credentials() -> Self {
    MemoryObjectStorage {
      has_credentials: false,
      objects: RwLock::new(HashMap::new()),
    }
  }

  pub fn object_count(&self) -> usize {
    self.objects.read().len()
  }

  pub fn contains(&self, key: &str) -> bool {
    self.objects.read().contains_key(key)
  }
}

impl Default for MemoryObjectStorage {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
  async fn upload(&self, bytes: &[u8], content_type: &str, key: &str) -> anyhow::Result<String> {
    if !self.has_credentials {
      bail!("object storage credentials are not configured");
    }
    if bytes.is_empty() {
      bail!("refusing to store an empty object at '{}'", key);
    }
    self.objects.write().insert(
      key.to_string(),
      StoredObject {
        content_type: content_type.to_string(),
        len: bytes.len(),
      },
    );
    Ok(format!("https://storage.talat.la/{}", key))
  }
}

/// Durable local cart store stand-in.
#[derive(Default)]
pub struct MemoryCartStore {
  carts: RwLock<HashMap<OwnerKey, Vec<CartLine>>>,
  fail_saves: AtomicBool,
}

impl MemoryCartStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes every subsequent `save` fail; the aggregator must keep working
  /// from its in-memory state.
  pub fn set_fail_saves(&self, fail: bool) {
    self.fail_saves.store(fail, Ordering::SeqCst);
  }

  /// Test inspection helper.
  pub fn stored(&self, owner: &OwnerKey) -> Option<Vec<CartLine>> {
    self.carts.read().get(owner).cloned()
  }
}

impl CartStore for MemoryCartStore {
  fn load(&self, owner: &OwnerKey) -> anyhow::Result<Option<Vec<CartLine>>> {
    Ok(self.carts.read().get(owner).cloned())
  }

  fn save(&self, owner: &OwnerKey, lines: &[CartLine]) -> anyhow::Result<()> {
    if self.fail_saves.load(Ordering::SeqCst) {
      bail!("local cart store is full");
    }
    self.carts.write().insert(owner.clone(), lines.to_vec());
    Ok(())
  }

  fn purge(&self, owner: &OwnerKey) -> anyhow::Result<()> {
    self.carts.write().remove(owner);
    Ok(())
  }
}
