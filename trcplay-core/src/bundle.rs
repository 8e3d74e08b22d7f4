//! File-backed loading of the three data tables.
//!
//! A data folder holds `Tibia.pic` (pictures), `Tibia.spr` (sprites) and
//! `Tibia.dat` (types). [`ResourceBundle::open`] maps all three or none:
//! if a later table fails to open, the mappings acquired earlier in the same
//! call are released before the error is returned.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ResourceError, Result};
use crate::io::{DataReader, MemoryMapping};
use crate::session::Resources;

/// Longest composed resource path accepted, in bytes.
pub const MAX_PATH_LEN: usize = 4096;

/// One of the three data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Pictures,
    Sprites,
    Types,
}

impl ResourceKind {
    /// All tables, in load order.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Pictures,
        ResourceKind::Sprites,
        ResourceKind::Types,
    ];

    /// File name of the table inside the data folder.
    pub fn file_name(&self) -> &'static str {
        match self {
            ResourceKind::Pictures => "Tibia.pic",
            ResourceKind::Sprites => "Tibia.spr",
            ResourceKind::Types => "Tibia.dat",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Join `dir` with the table's file name using the platform separator.
pub fn resource_path(
    dir: &Path,
    kind: ResourceKind,
) -> std::result::Result<PathBuf, ResourceError> {
    let path = dir.join(kind.file_name());
    let len = path.as_os_str().len();
    if len >= MAX_PATH_LEN {
        return Err(ResourceError::PathTooLong { kind, len });
    }
    Ok(path)
}

/// The three data tables, each held open by a handle of type `M`.
///
/// `M` is a [`MemoryMapping`] unless a custom opener is used. Readers
/// returned by [`readers`](Self::readers) borrow the bundle, so it cannot be
/// closed while they are in use.
pub struct ResourceBundle<M = MemoryMapping> {
    pictures: M,
    sprites: M,
    types: M,
}

impl ResourceBundle<MemoryMapping> {
    /// Map `Tibia.pic`, `Tibia.spr` and `Tibia.dat` from `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::open_with(dir, |_, path| MemoryMapping::map(path))
    }
}

impl<M: AsRef<[u8]>> ResourceBundle<M> {
    /// Open the three tables from `dir` with a custom opener.
    ///
    /// All three paths are composed before the first open. Tables are
    /// opened in [`ResourceKind::ALL`] order; a failure drops every handle
    /// opened so far and reports the table that failed.
    pub fn open_with<P, F>(dir: P, mut opener: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: FnMut(ResourceKind, &Path) -> io::Result<M>,
    {
        let dir = dir.as_ref();

        let pictures_path = resource_path(dir, ResourceKind::Pictures)?;
        let sprites_path = resource_path(dir, ResourceKind::Sprites)?;
        let types_path = resource_path(dir, ResourceKind::Types)?;

        let pictures = open_resource(&mut opener, ResourceKind::Pictures, pictures_path)?;
        let sprites = open_resource(&mut opener, ResourceKind::Sprites, sprites_path)?;
        let types = open_resource(&mut opener, ResourceKind::Types, types_path)?;

        let bundle = Self {
            pictures,
            sprites,
            types,
        };
        debug!(
            dir = %dir.display(),
            pictures = bundle.pictures.as_ref().len(),
            sprites = bundle.sprites.as_ref().len(),
            types = bundle.types.as_ref().len(),
            "opened resource bundle"
        );

        Ok(bundle)
    }

    /// Fresh readers over the full contents of each table.
    pub fn readers(&self) -> Resources<'_> {
        Resources {
            pictures: DataReader::new(self.pictures.as_ref()),
            sprites: DataReader::new(self.sprites.as_ref()),
            types: DataReader::new(self.types.as_ref()),
        }
    }

    /// The handle for one table.
    pub fn get(&self, kind: ResourceKind) -> &M {
        match kind {
            ResourceKind::Pictures => &self.pictures,
            ResourceKind::Sprites => &self.sprites,
            ResourceKind::Types => &self.types,
        }
    }

    /// Release all three tables.
    pub fn close(self) {
        drop(self);
        debug!("closed resource bundle");
    }
}

fn open_resource<M, F>(opener: &mut F, kind: ResourceKind, path: PathBuf) -> Result<M>
where
    F: FnMut(ResourceKind, &Path) -> io::Result<M>,
{
    match opener(kind, &path) {
        Ok(handle) => Ok(handle),
        Err(source) => {
            debug!(%kind, path = %path.display(), error = %source, "failed to open resource");
            Err(ResourceError::Open { kind, path, source }.into())
        }
    }
}

impl<M: AsRef<[u8]>> fmt::Debug for ResourceBundle<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceBundle")
            .field("pictures", &self.pictures.as_ref().len())
            .field("sprites", &self.sprites.as_ref().len())
            .field("types", &self.types.as_ref().len())
            .finish()
    }
}
