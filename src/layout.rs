//! Renderer-facing description of the board scene.
//!
//! Nothing here draws anything. A [`Layout`](struct.Layout.html) lists every mesh the scene needs
//! (tiles, border bars, labels and piece models) with its placement and material, so that a
//! rendering engine can build the scene graph from it.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::f32::consts::PI;
use serde::Serialize;
use crate::board::{Board, Geometry, Vec3, PieceHandle, PieceFactory};
use crate::chess::{Color, Piece, File, Rank, Square};
use crate::config::{Material, PieceConfig, SceneConfig};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A piece handle naming the model asset and material to render it with
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct PieceModel {
    pub color: Color,
    pub piece: Piece,
    pub model: String,
    pub material: Material,
}

impl PieceHandle for PieceModel {
    fn color(&self) -> Color {
        self.color
    }

    fn piece(&self) -> Piece {
        self.piece
    }
}

/// Creates [`PieceModel`](struct.PieceModel.html) handles from the piece section of a
/// configuration
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    pieces: PieceConfig,
}

impl ModelCatalog {
    /// Creates a catalog from the given piece configuration
    pub fn new(pieces: PieceConfig) -> Self {
        ModelCatalog { pieces }
    }
}

impl PieceFactory for ModelCatalog {
    type Handle = PieceModel;

    fn create(&mut self, color: Color, piece: Piece) -> PieceModel {
        PieceModel {
            color,
            piece,
            model: self.pieces.model(piece).to_string(),
            material: self.pieces.material(color).clone(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A square tile of the board
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct Tile {
    pub square: Square,
    pub position: Vec3,
    pub size: f32,
    pub material: Material,
}

/// One of the four bars framing the board
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct Border {
    pub position: Vec3,
    pub size: Vec3,
    pub material: Material,
}

/// A rank or file label lying on the border
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct Label {
    pub text: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub size: f32,
    pub depth: f32,
    pub material: Material,
}

/// A piece model standing on a square
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct PlacedPiece {
    pub square: Square,
    pub color: Color,
    pub piece: Piece,
    pub position: Vec3,
    pub model: String,
    pub material: Material,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Everything the renderer needs to draw the board and the pieces on it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Rotation of the whole board group, in radians about `x`, `y` and `z`
    pub rotation: Vec3,
    /// The 64 tiles, in square order
    pub tiles: Vec<Tile>,
    /// The border bars
    pub borders: Vec<Border>,
    /// Rank labels `1` to `8`, then file labels `A` to `H`
    pub labels: Vec<Label>,
    /// The pieces on the board, in square order
    pub pieces: Vec<PlacedPiece>,
}

impl Layout {
    /// Describes `board` using the materials and models from `config`. Placement follows the
    /// board's own geometry.
    pub fn of<T: PieceHandle>(board: &Board<T>, config: &SceneConfig) -> Layout {
        let g = board.geometry();

        let tiles = Square::all().map(|sq| {
            let material = if (Geometry::column(sq) + Geometry::row(sq)) % 2 == 0 {
                &config.tiles.light
            } else {
                &config.tiles.dark
            };
            Tile {
                square: sq,
                position: g.tile_position_of(sq),
                size: g.square_size,
                material: material.clone(),
            }
        }).collect();

        let pieces = board.occupants().map(|(sq, occ)| {
            PlacedPiece {
                square: sq,
                color: occ.color(),
                piece: occ.piece(),
                position: g.position_of(sq),
                model: config.pieces.model(occ.piece()).to_string(),
                material: config.pieces.material(occ.color()).clone(),
            }
        }).collect();

        Layout {
            rotation: Vec3::new(-2.0 * PI, 1.6, 0.0),
            tiles,
            borders: borders(g, &config.border),
            labels: labels(g, config),
            pieces,
        }
    }

    /// Serializes the layout to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

fn borders(g: &Geometry, material: &Material) -> Vec<Border> {
    let b = g.board_size();
    let w = g.border_width;
    let along_x = Vec3::new(b + 2.0 * w, w, w);
    let along_z = Vec3::new(w, w, b);
    let edge = b / 2.0 + w / 2.0;

    vec![
        Border { position: Vec3::new(0.0, 0.0, -edge), size: along_x, material: material.clone() },
        Border { position: Vec3::new(0.0, 0.0, edge), size: along_x, material: material.clone() },
        Border { position: Vec3::new(-edge, 0.0, 0.0), size: along_z, material: material.clone() },
        Border { position: Vec3::new(edge, 0.0, 0.0), size: along_z, material: material.clone() },
    ]
}

fn labels(g: &Geometry, config: &SceneConfig) -> Vec<Label> {
    let b = g.board_size();
    let w = g.border_width;
    let step = b / Geometry::SQUARES_PER_SIDE as f32;
    let label = |text: char, position, rotation| Label {
        text: text.to_string(),
        position,
        rotation,
        size: config.labels.size,
        depth: config.labels.depth,
        material: config.labels.material.clone(),
    };

    let ranks = (0..Rank::COUNT).map(|i| {
        let rank = Rank::ALL[i];
        let position = Vec3::new(-b / 2.0 + w + i as f32 * step - 0.8, 1.0, -b / 2.3 - w);
        label(rank.to_char(), position, Vec3::new(-PI / 2.0, 0.0, 0.0))
    });
    let files = (0..File::COUNT).map(|i| {
        let file = File::ALL[i];
        let position = Vec3::new(-b / 2.0 - w + 1.0, 1.0, -b / 2.0 + w + i as f32 * step - 0.8);
        label(file.to_char(), position, Vec3::new(-PI / 2.0, 0.0, -PI / 2.0))
    });

    ranks.chain(files).collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// ***************************************** UNIT TESTS ***************************************** //
////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod test {
    use super::*;

    fn assert_near(a: Vec3, b: Vec3) {
        let d = a - b;
        assert!(d.x.abs() < 1e-4 && d.y.abs() < 1e-4 && d.z.abs() < 1e-4, "{} != {}", a, b);
    }

    fn tile<'a>(layout: &'a Layout, name: &str) -> &'a Tile {
        let sq: Square = name.parse().unwrap();
        &layout.tiles[sq.index()]
    }

    #[test]
    fn empty_board_has_no_pieces() {
        let board: Board = Board::new();
        let layout = Layout::of(&board, &SceneConfig::default());
        assert_eq!(layout.tiles.len(), 64);
        assert_eq!(layout.borders.len(), 4);
        assert_eq!(layout.labels.len(), 16);
        assert!(layout.pieces.is_empty());
    }

    #[test]
    fn tiles_alternate_with_a1_dark() {
        let config = SceneConfig::default();
        let board: Board = Board::new();
        let layout = Layout::of(&board, &config);

        assert_eq!(tile(&layout, "A1").material, config.tiles.dark);
        assert_eq!(tile(&layout, "H1").material, config.tiles.light);
        assert_eq!(tile(&layout, "A8").material, config.tiles.light);
        assert_eq!(tile(&layout, "H8").material, config.tiles.dark);
        assert_eq!(tile(&layout, "E4").material, config.tiles.light);
        assert_eq!(tile(&layout, "A1").position, Vec3::new(-7.0, 0.0, 7.0));
        assert_eq!(tile(&layout, "A1").size, 2.0);
    }

    #[test]
    fn borders_frame_the_board() {
        let board: Board = Board::new();
        let layout = Layout::of(&board, &SceneConfig::default());
        let b = &layout.borders;

        assert_near(b[0].position, Vec3::new(0.0, 0.0, -8.9));
        assert_near(b[1].position, Vec3::new(0.0, 0.0, 8.9));
        assert_near(b[2].position, Vec3::new(-8.9, 0.0, 0.0));
        assert_near(b[3].position, Vec3::new(8.9, 0.0, 0.0));
        assert_near(b[0].size, Vec3::new(19.6, 1.8, 1.8));
        assert_near(b[2].size, Vec3::new(1.8, 1.8, 16.0));
        assert!(b.iter().all(|border| border.material.color == "#000000"));
    }

    #[test]
    fn labels_spell_ranks_then_files() {
        let board: Board = Board::new();
        let layout = Layout::of(&board, &SceneConfig::default());
        let text: String = layout.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(text, "12345678ABCDEFGH");

        let rank_1 = &layout.labels[0];
        assert_near(rank_1.position, Vec3::new(-7.0, 1.0, -8.0 / 2.3 * 2.0 - 1.8));
        let rank_8 = &layout.labels[7];
        assert_near(rank_8.position, Vec3::new(7.0, 1.0, -8.0 / 2.3 * 2.0 - 1.8));
        let file_a = &layout.labels[8];
        assert_near(file_a.position, Vec3::new(-8.8, 1.0, -7.0));
        assert_eq!(file_a.rotation, Vec3::new(-PI / 2.0, 0.0, -PI / 2.0));
    }

    #[test]
    fn pieces_follow_occupants() {
        let config = SceneConfig::default();
        let mut board: Board = Board::new();
        board.setup().unwrap();
        board.move_piece("G1", "F3").unwrap();
        let layout = Layout::of(&board, &config);

        assert_eq!(layout.pieces.len(), 32);
        let knight = layout.pieces.iter().find(|p| p.square.to_string() == "F3").unwrap();
        assert_eq!(knight.piece, Piece::Knight);
        assert_eq!(knight.color, Color::White);
        assert_eq!(knight.position, board.position_of("F3").unwrap());
        assert_eq!(knight.model, "/models/Knight/Knight.glb");
        assert_eq!(knight.material, config.pieces.white);
    }

    #[test]
    fn catalog_creates_model_handles() {
        let mut board = Board::new();
        board.setup_initial_position(&mut ModelCatalog::default()).unwrap();
        let king = board.occupant_at("E8").unwrap().unwrap();
        assert_eq!(king.piece, Piece::King);
        assert_eq!(king.color, Color::Black);
        assert_eq!(king.model, "/models/King/King.glb");
        assert_eq!(king.material.color, "#000000");
        assert_eq!(board.to_string(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    }

    #[test]
    fn layout_serializes_to_yaml() {
        let mut board: Board = Board::new();
        board.place("E4", crate::board::Occupant::new(Color::White, Piece::Queen)).unwrap();
        let yaml = Layout::of(&board, &SceneConfig::default()).to_yaml().unwrap();
        assert!(yaml.contains("square: E4"));
        assert!(yaml.contains("piece: queen"));
        assert!(yaml.contains("/models/Queen/Queen.glb"));
    }
}
