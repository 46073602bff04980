use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::{debug, info};

use crate::{error::Result, family::family_names};

/// A store of font binaries looked up by family name.
///
/// Implementations must be safe to share between threads; every method is
/// atomic with respect to the others.
pub trait FontRegistry: Send + Sync {
    /// Registers a font file or collection under the family name of each
    /// font it contains.
    fn register(&self, font: Vec<u8>) -> Result<()>;

    /// Removes every font whose family name matches `predicate`, returning
    /// how many registrations were dropped.
    fn remove_where(&self, predicate: &dyn Fn(&str) -> bool) -> usize;

    /// Font binaries registered for `family`, oldest first.
    fn lookup(&self, family: &str) -> Vec<Arc<[u8]>>;

    /// Removes fonts matching `predicate` and registers `fonts` as one step.
    ///
    /// No lookup observes the registry between the removal and the
    /// registration. If any of `fonts` cannot be read nothing changes.
    fn replace_where(&self, predicate: &dyn Fn(&str) -> bool, fonts: Vec<Vec<u8>>)
    -> Result<usize>;

    /// Registered family names in sorted order.
    fn families(&self) -> Vec<String>;
}

type FamilyMap = BTreeMap<String, Vec<Arc<[u8]>>>;

/// Process-local [`FontRegistry`] guarded by a single mutex.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    fonts: Mutex<FamilyMap>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FamilyMap> {
        // every critical section leaves the map consistent
        self.fonts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A font ready to be inserted: its bytes and the families it provides.
struct Prepared {
    families: BTreeSet<String>,
    data: Arc<[u8]>,
}

fn prepare(fonts: Vec<Vec<u8>>) -> Result<Vec<Prepared>> {
    fonts
        .into_iter()
        .map(|font| {
            let families = family_names(&font)?.into_iter().collect();
            Ok(Prepared { families, data: Arc::from(font) })
        })
        .collect()
}

fn insert(map: &mut FamilyMap, prepared: Vec<Prepared>) {
    for font in prepared {
        for family in font.families {
            debug!("Registering {} bytes as '{family}'", font.data.len());
            map.entry(family).or_default().push(Arc::clone(&font.data));
        }
    }
}

fn remove(map: &mut FamilyMap, predicate: &dyn Fn(&str) -> bool) -> usize {
    let mut removed = 0;
    map.retain(|family, fonts| {
        let matches = predicate(family);
        if matches {
            debug!("Removing {} font(s) of '{family}'", fonts.len());
            removed += fonts.len();
        }
        !matches
    });
    removed
}

impl FontRegistry for InMemoryRegistry {
    fn register(&self, font: Vec<u8>) -> Result<()> {
        let prepared = prepare(vec![font])?;
        insert(&mut self.lock(), prepared);
        Ok(())
    }

    fn remove_where(&self, predicate: &dyn Fn(&str) -> bool) -> usize {
        remove(&mut self.lock(), predicate)
    }

    fn lookup(&self, family: &str) -> Vec<Arc<[u8]>> {
        self.lock().get(family).cloned().unwrap_or_default()
    }

    fn replace_where(
        &self,
        predicate: &dyn Fn(&str) -> bool,
        fonts: Vec<Vec<u8>>,
    ) -> Result<usize> {
        let prepared = prepare(fonts)?;
        let mut map = self.lock();
        let removed = remove(&mut map, predicate);
        insert(&mut map, prepared);
        info!("Replaced {removed} font(s); {} families registered", map.len());
        Ok(removed)
    }

    fn families(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}
