//! Asset embedding, lookup of user overrides, and loading utilities.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc;
use thiserror::Error;
use town_map::{RasterImage, SvgError, TownSvg, ZoneRegion, ZoneTable, ZoneTableError};

use crate::constants::{CONFIG_DIR_NAME, RASTER_SCALE};

/// Embeds all assets from the assets/ directory into the binary.
/// In debug mode, assets are loaded from the filesystem for faster iteration.
/// In release mode, assets are compressed and embedded in the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

pub const ZONES_FILE: &str = "zones.ron";
pub const MAP_FILE: &str = "town.svg";
const ICON_FILE: &str = "town-map-icon.svg";

/// Errors that can occur when loading the zone table or map image.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("{0} not found in embedded assets")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid UTF-8 in {name}: {source}")]
    InvalidUtf8 {
        name: String,
        source: std::str::Utf8Error,
    },
    #[error(transparent)]
    ZoneTable(#[from] ZoneTableError),
    #[error("{name}: {source}")]
    Svg { name: String, source: SvgError },
}

/// Where an asset is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetSource {
    File(PathBuf),
    Embedded(&'static str),
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Embedded(name) => write!(f, "embedded {name}"),
        }
    }
}

impl AssetSource {
    /// Picks the command-line path, then `<config dir>/town-map/<file_name>`,
    /// then the embedded copy.
    pub fn resolve(cli_path: Option<PathBuf>, file_name: &'static str) -> Self {
        if let Some(path) = cli_path {
            return Self::File(path);
        }

        let user_path = dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(file_name));
        match user_path {
            Some(path) if path.is_file() => Self::File(path),
            _ => Self::Embedded(file_name),
        }
    }

    fn read(&self) -> Result<Cow<'static, [u8]>, AssetError> {
        match self {
            Self::File(path) => std::fs::read(path)
                .map(Cow::Owned)
                .map_err(|source| AssetError::Io {
                    path: path.clone(),
                    source,
                }),
            Self::Embedded(name) => Assets::get(name)
                .map(|file| file.data)
                .ok_or_else(|| AssetError::NotFound((*name).to_owned())),
        }
    }
}

/// Map image decoded off the UI thread.
pub struct DecodedMap {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Intrinsic SVG size; regions are expressed in these units.
    pub logical_size: [f32; 2],
    pub regions: Vec<ZoneRegion>,
}

/// State of the map being loaded asynchronously.
pub enum AssetLoadState {
    /// Map is being parsed and rasterised in a background thread.
    Loading(mpsc::Receiver<Result<DecodedMap, AssetError>>),
    /// Map has been decoded and is ready for texture creation.
    Ready(DecodedMap),
    /// Loading failed; stores the error message (already displayed via toast).
    Error(String),
}

/// Loads the zone table from a file (`.ron` or `.json`) or the embedded default.
pub fn load_zone_table(source: &AssetSource) -> Result<ZoneTable, AssetError> {
    match source {
        AssetSource::File(path) => Ok(ZoneTable::load(path)?),
        AssetSource::Embedded(name) => {
            let data = source.read()?;
            let ron_string =
                std::str::from_utf8(&data).map_err(|source| AssetError::InvalidUtf8 {
                    name: (*name).to_owned(),
                    source,
                })?;
            Ok(ZoneTable::from_ron_str(ron_string)?)
        }
    }
}

/// Parses the map SVG, collects its zone regions and rasterises it.
pub fn load_and_decode_map(source: &AssetSource) -> Result<DecodedMap, AssetError> {
    let data = source.read()?;
    let svg_error = |err| AssetError::Svg {
        name: source.to_string(),
        source: err,
    };

    let svg = TownSvg::parse(&data).map_err(svg_error)?;
    let raster = svg.rasterize(RASTER_SCALE).map_err(svg_error)?;
    let logical_size = svg.size();

    Ok(DecodedMap {
        pixels: raster.pixels,
        width: raster.width,
        height: raster.height,
        logical_size,
        regions: svg.into_regions(),
    })
}

/// Rasterises the embedded window icon with straight alpha.
pub fn load_icon(size: u32) -> Result<RasterImage, AssetError> {
    let source = AssetSource::Embedded(ICON_FILE);
    let data = source.read()?;
    let svg_error = |err| AssetError::Svg {
        name: ICON_FILE.to_owned(),
        source: err,
    };

    let svg = TownSvg::parse(&data).map_err(svg_error)?;
    let [width, height] = svg.size();
    let scale = size as f32 / width.max(height);
    Ok(svg.rasterize(scale).map_err(svg_error)?.unmultiplied())
}
