//! Scene configuration, read from and written to YAML.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::io;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use log::debug;
use serde::{Serialize, Deserialize};
use crate::board::Geometry;
use crate::chess::{Color, Piece};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Surface properties handed to the renderer for a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as a CSS hex string, eg. `#D8A400`
    pub color: String,
    /// Roughness, from 0 to 1
    pub roughness: f32,
    /// Metalness, from 0 to 1
    pub metalness: f32,
}

impl Material {
    /// Creates a new material
    pub fn new(color: &str, roughness: f32, metalness: f32) -> Self {
        Material { color: color.to_string(), roughness, metalness }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Materials for the two tile colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TileConfig {
    pub light: Material,
    pub dark: Material,
}

impl Default for TileConfig {
    fn default() -> Self {
        TileConfig {
            light: Material::new("#D8A400", 0.3, 0.4),
            dark: Material::new("#3A3A3A", 0.3, 0.4),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Appearance of the rank and file labels on the border
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Label material
    pub material: Material,
    /// Height of the label glyphs
    pub size: f32,
    /// Extrusion depth of the label glyphs
    pub depth: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            material: Material::new("#D8A400", 0.3, 0.4),
            size: 0.5,
            depth: 0.05,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Model asset for each kind of piece, and the material for each side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct PieceConfig {
    pub pawn: String,
    pub knight: String,
    pub bishop: String,
    pub rook: String,
    pub queen: String,
    pub king: String,
    pub white: Material,
    pub black: Material,
}

impl PieceConfig {
    /// Returns the model asset for `piece`
    pub fn model(&self, piece: Piece) -> &str {
        match piece {
            Piece::Pawn => &self.pawn,
            Piece::Knight => &self.knight,
            Piece::Bishop => &self.bishop,
            Piece::Rook => &self.rook,
            Piece::Queen => &self.queen,
            Piece::King => &self.king,
        }
    }

    /// Returns the material for `color`'s pieces
    pub fn material(&self, color: Color) -> &Material {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

impl Default for PieceConfig {
    fn default() -> Self {
        let model = |piece: Piece| format!("/models/{0}/{0}.glb", piece.name());

        PieceConfig {
            pawn: model(Piece::Pawn),
            knight: model(Piece::Knight),
            bishop: model(Piece::Bishop),
            rook: model(Piece::Rook),
            queen: model(Piece::Queen),
            king: model(Piece::King),
            white: Material::new("#ffffff", 0.1, 0.6),
            black: Material::new("#000000", 0.1, 0.6),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Everything needed to describe the board scene. Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SceneConfig {
    pub geometry: Geometry,
    pub tiles: TileConfig,
    pub border: Material,
    pub labels: LabelConfig,
    pub pieces: PieceConfig,
}

impl SceneConfig {
    /// Location of the per-user configuration file, `~/.chessboard3d/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".chessboard3d").join("config.yaml"))
    }

    /// Reads and validates a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_yaml(&read_to_string(path)?)?;
        debug!("loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a configuration from YAML
    pub fn from_yaml(s: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks that the geometry describes a drawable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.geometry.flaw() {
            Some(reason) => Err(ConfigError::InvalidGeometry(reason)),
            None => Ok(()),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            geometry: Geometry::default(),
            tiles: TileConfig::default(),
            border: Material::new("#000000", 0.01, 0.4),
            labels: LabelConfig::default(),
            pieces: PieceConfig::default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error reading or validating a configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The file couldn't be read
    Io(io::Error),
    /// The YAML is malformed or doesn't match the expected structure
    Yaml(serde_yaml::Error),
    /// The geometry can't describe a board
    InvalidGeometry(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => err.fmt(f),
            ConfigError::Yaml(err) => err.fmt(f),
            ConfigError::InvalidGeometry(reason) => write!(f, "invalid geometry: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError { }

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// ***************************************** UNIT TESTS ***************************************** //
////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_models() {
        let pieces = PieceConfig::default();
        assert_eq!(pieces.model(Piece::Rook), "/models/Rook/Rook.glb");
        assert_eq!(pieces.model(Piece::Knight), "/models/Knight/Knight.glb");
        assert_eq!(pieces.model(Piece::Pawn), "/models/Pawn/Pawn.glb");
        assert_eq!(pieces.material(Color::White).color, "#ffffff");
        assert_eq!(pieces.material(Color::Black).color, "#000000");
    }

    #[test]
    fn defaults_survive_yaml() {
        let config = SceneConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(SceneConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = SceneConfig::from_yaml("geometry:\n  square_size: 1.5\n").unwrap();
        assert_eq!(config.geometry.square_size, 1.5);
        assert_eq!(config.geometry.height_offset, Geometry::default().height_offset);
        assert_eq!(config.tiles, TileConfig::default());
        assert_eq!(config.pieces, PieceConfig::default());
    }

    #[test]
    fn model_paths_can_be_overridden() {
        let config = SceneConfig::from_yaml("pieces:\n  queen: assets/q.glb\n").unwrap();
        assert_eq!(config.pieces.model(Piece::Queen), "assets/q.glb");
        assert_eq!(config.pieces.model(Piece::King), "/models/King/King.glb");
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        for yaml in &[
            "geometry:\n  square_size: 0\n",
            "geometry:\n  square_size: -2\n",
            "geometry:\n  border_width: -1\n",
            "geometry:\n  height_offset: .nan\n",
            "geometry:\n  square_size: 1.0e38\n",
        ] {
            match SceneConfig::from_yaml(yaml) {
                Err(ConfigError::InvalidGeometry(_)) => { },
                other => panic!("{:?}: expected invalid geometry, got {:?}", yaml, other),
            }
        }
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        match SceneConfig::from_yaml("geometry: [1, 2") {
            Err(ConfigError::Yaml(_)) => { },
            other => panic!("expected yaml error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        match SceneConfig::load(Path::new("/nonexistent/chessboard3d/config.yaml")) {
            Err(ConfigError::Io(_)) => { },
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
