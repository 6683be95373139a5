//! Registration of upstream records into their protocol set.

use crate::error::RegistrarError;
use crate::store::UpstreamStore;
use crate::upstream::UpstreamRecord;
use log::info;

/// Outcome of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Set the record was added to
    pub key: String,
    /// Encoded record as stored
    pub member: String,
    /// `false` when the set already held an identical member
    pub added: bool,
}

/// Writes upstream records into a store, one set-add per record
pub struct Registrar<S> {
    store: S,
}

impl<S: UpstreamStore> Registrar<S> {
    pub fn new(store: S) -> Self {
        Registrar { store }
    }

    /// Encode `record` and add it to `rps:upstream:<proto>`
    pub fn register(&mut self, record: &UpstreamRecord) -> Result<Registration, RegistrarError> {
        let key = record.storage_key();
        let member = record.to_member()?;

        let added = self.store.add_member(&key, &member)?;
        if added {
            info!("Registered {} in {}", record.address(), key);
        } else {
            info!("{} was already registered in {}", record.address(), key);
        }

        Ok(Registration { key, member, added })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
