use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// Locates the path of a workspace crate as seen from the caller's
/// Cargo.toml, so that generated code compiles whether the caller depends
/// on the member crate or on the facade.
///
/// # Example
///
/// ```rust
/// # use am_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("am_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::crate_name`.
/// 2. A crate named `am_*` resolves to `::am_core::*` when the caller
///    depends on the facade (e.g. `am_reflect` -> `::am_core::reflect`).
/// 3. Steps 1-2 are repeated in `dev-dependencies`.
/// 4. Otherwise the absolute path `::crate_name` is returned.
///
/// A crate that names itself from derived code needs
/// `extern crate self as crate_name;` at its root.
#[derive(Debug)]
pub struct Manifest {
    /// `None` when the caller's Cargo.toml could not be read.
    pub manifest: Option<Document<Box<str>>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "am_core";
const MEMBER_PREFIX: &str = "am_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        path.exists().then_some(path)
    }

    #[inline(never)]
    fn get_manifest_modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Option<Document<Box<str>>> {
        let manifest = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(manifest).ok()
    }

    fn absolute(name: &str) -> syn::Path {
        let ident = syn::Ident::new(name, Span::call_site());
        let mut path = syn::Path::from(ident);
        path.leading_colon = Some(Default::default());
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(name));
        }
        let module = name.strip_prefix(MEMBER_PREFIX)?;
        if name != FACADE_NAME && deps.contains_key(FACADE_NAME) {
            let mut path = Self::absolute(FACADE_NAME);
            path.segments
                .push(syn::Ident::new(module, Span::call_site()).into());
            return Some(path);
        }
        None
    }

    /// Returns a [`syn::Path`] for the crate named `name` as resolved from
    /// this crate's Cargo.toml. See the type docs for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let Some(manifest) = &self.manifest else {
            return Self::absolute(name);
        };
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|table| match manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::absolute(name))
    }

    /// Runs `func` against the caller's Cargo.toml.
    ///
    /// Parsed manifests are cached per path and reparsed when the file's
    /// modification time changes. Outside of cargo, `func` sees an empty
    /// manifest and every lookup falls back to `::crate_name`.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(manifest_path) = Self::get_manifest_path() else {
            return func(&Self::empty());
        };
        let Some(modified_time) = Self::get_manifest_modified_time(&manifest_path) else {
            return func(&Self::empty());
        };

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }

    fn empty() -> Self {
        Self {
            manifest: None,
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
