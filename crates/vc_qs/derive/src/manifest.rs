use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

const ENGINE_CRATE: &str = "vc_qs";
const FACADE_CRATE: &str = "vc_query";
const FACADE_MODULE: &str = "qs";

/// A parsed `Cargo.toml` of a crate using the derive.
struct Manifest {
    document: Document<Box<str>>,
    modified_time: SystemTime,
}

impl Manifest {
    fn locate() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()
    }

    fn read(path: &Path, modified_time: SystemTime) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        let document = Document::parse(text).ok()?;
        Some(Self {
            document,
            modified_time,
        })
    }

    /// `dependencies` first, then `dev-dependencies`.
    fn engine_path(&self) -> Option<syn::Path> {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|section| match self.document.get(section) {
                Some(Item::Table(deps)) => find_in_deps(deps),
                _ => None,
            })
    }
}

fn find_in_deps(deps: &Table) -> Option<syn::Path> {
    if deps.contains_key(ENGINE_CRATE) {
        return syn::parse_str(&format!("::{ENGINE_CRATE}")).ok();
    }
    if deps.contains_key(FACADE_CRATE) {
        return syn::parse_str(&format!("::{FACADE_CRATE}::{FACADE_MODULE}")).ok();
    }
    None
}

#[inline]
fn fallback() -> syn::Path {
    syn::parse_quote!(::vc_qs)
}

/// The path of the engine crate as seen from the crate being compiled.
///
/// 1. A crate depending on `vc_qs` gets `::vc_qs`.
/// 2. A crate depending on the `vc_query` facade gets `::vc_query::qs`.
/// 3. Anything else, including `vc_qs` itself, gets `::vc_qs`.
///
/// Manifests are parsed once per modification and cached.
pub(crate) fn vc_qs() -> syn::Path {
    static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

    let Some(path) = Manifest::locate() else {
        return fallback();
    };
    let Some(modified_time) = Manifest::modified_time(&path) else {
        return fallback();
    };

    {
        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time == modified_time
        {
            return manifest.engine_path().unwrap_or_else(fallback);
        }
    }

    let Some(manifest) = Manifest::read(&path, modified_time) else {
        return fallback();
    };
    let resolved = manifest.engine_path().unwrap_or_else(fallback);
    MANIFESTS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(path, manifest);
    resolved
}
