use crate::types::{Color, File, Key, Piece, Rank};

use arrayvec::ArrayVec;
use derive_more::Deref;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum number of squares touched by a single move (castling touches four)
pub const MAX_CHANGES: usize = 4;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlacementParseError {
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    #[error("too many items in rank {}", .0.as_char())]
    RankOverflow(Rank),
    #[error("not enough items in rank {}", .0.as_char())]
    RankUnderflow(Rank),
    #[error("too many ranks")]
    TooManyRanks,
    #[error("not enough ranks")]
    NotEnoughRanks,
    #[error("promotion mark without a piece")]
    DanglingPromotionMark,
}

/// Set of independent square assignments
///
/// Each entry sets a square to a piece (`Some`) or empties it (`None`). Entries never
/// depend on each other, so the order in which they are applied does not matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Changes(ArrayVec<(Key, Option<Piece>), MAX_CHANGES>);

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment, replacing the previous one for the same square
    pub fn set(&mut self, key: Key, piece: Option<Piece>) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = piece,
            None => self.0.push((key, piece)),
        }
    }

    pub fn with(mut self, key: Key, piece: Option<Piece>) -> Self {
        self.set(key, piece);
        self
    }
}

impl<'a> IntoIterator for &'a Changes {
    type Item = &'a (Key, Option<Piece>);
    type IntoIter = std::slice::Iter<'a, (Key, Option<Piece>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Changes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, (key, piece)) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            match piece {
                Some(p) => write!(f, "{}={}", key, p)?,
                None => write!(f, "{}=.", key)?,
            }
        }
        Ok(())
    }
}

/// Full piece placement of the widget board
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pieces([Option<Piece>; 64]);

impl Pieces {
    pub const EMPTY: Pieces = Pieces([None; 64]);

    pub fn get(&self, key: Key) -> Option<Piece> {
        self.0[key.index()]
    }

    pub fn put(&mut self, key: Key, piece: Option<Piece>) {
        self.0[key.index()] = piece;
    }

    /// Moves the piece from `from` to `to`, overwriting whatever stands on `to`
    pub fn relocate(&mut self, from: Key, to: Key) {
        if from == to {
            return;
        }
        let piece = self.0[from.index()].take();
        if piece.is_some() {
            self.0[to.index()] = piece;
        }
    }

    pub fn apply(&mut self, changes: &Changes) {
        for &(key, piece) in changes {
            self.put(key, piece);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, Piece)> + '_ {
        Key::iter().filter_map(|k| self.get(k).map(|p| (k, p)))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Compares the placements, ignoring the promoted flags
    pub fn same_placement(&self, other: &Pieces) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.map(|p| (p.role, p.color)) == b.map(|p| (p.role, p.color)))
    }

    /// Parses the placement part of a FEN string
    ///
    /// Anything after the placement (side to move, pockets in brackets) is ignored, and
    /// a `~` after a piece marks it as promoted.
    pub fn from_fen(fen: &str) -> Result<Pieces, PlacementParseError> {
        type Error = PlacementParseError;

        let placement = fen
            .split(|c: char| c == ' ' || c == '[')
            .next()
            .unwrap_or_default();
        let mut res = Pieces::EMPTY;
        let mut ranks = placement.split('/');
        for rank in Rank::iter().rev() {
            let row = ranks.next().ok_or(Error::NotEnoughRanks)?;
            let mut file = 0_usize;
            let mut last: Option<Key> = None;
            for c in row.chars() {
                match c {
                    '1'..='8' => {
                        file += (u32::from(c) - u32::from('0')) as usize;
                        last = None;
                    }
                    '~' => {
                        let key = last.take().ok_or(Error::DanglingPromotionMark)?;
                        if let Some(piece) = res.0[key.index()].as_mut() {
                            piece.promoted = true;
                        }
                        continue;
                    }
                    _ => {
                        let piece = Piece::from_char(c).ok_or(Error::UnexpectedChar(c))?;
                        if file >= 8 {
                            return Err(Error::RankOverflow(rank));
                        }
                        let key = Key::from_parts(File::from_index(file), rank);
                        res.put(key, Some(piece));
                        last = Some(key);
                        file += 1;
                    }
                }
                if file > 8 {
                    return Err(Error::RankOverflow(rank));
                }
            }
            if file < 8 {
                return Err(Error::RankUnderflow(rank));
            }
        }
        if ranks.next().is_some() {
            return Err(Error::TooManyRanks);
        }
        Ok(res)
    }

    /// Formats the placement part of a FEN string
    pub fn as_fen(&self) -> String {
        let mut res = String::new();
        for rank in Rank::iter().rev() {
            let mut empty = 0;
            for file in File::iter() {
                match self.get(Key::from_parts(file, rank)) {
                    Some(piece) => {
                        if empty != 0 {
                            res.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        res.push_str(&piece.to_string());
                    }
                    None => empty += 1,
                }
            }
            if empty != 0 {
                res.push((b'0' + empty) as char);
            }
            if rank != Rank::R1 {
                res.push('/');
            }
        }
        res
    }

    /// Renders the board as text, White at the bottom
    pub fn pretty(&self, orientation: Color) -> String {
        let mut res = String::new();
        let ranks: Vec<Rank> = match orientation {
            Color::White => Rank::iter().rev().collect(),
            Color::Black => Rank::iter().collect(),
        };
        let files: Vec<File> = match orientation {
            Color::White => File::iter().collect(),
            Color::Black => File::iter().rev().collect(),
        };
        for rank in &ranks {
            res.push(rank.as_char());
            res.push(' ');
            for file in &files {
                let c = self
                    .get(Key::from_parts(*file, *rank))
                    .map_or('.', |p| p.as_char());
                res.push(c);
            }
            res.push('\n');
        }
        res.push_str("  ");
        res.extend(files.iter().map(File::as_char));
        res.push('\n');
        res
    }
}

impl Default for Pieces {
    fn default() -> Self {
        Pieces::EMPTY
    }
}

impl fmt::Debug for Pieces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Pieces({})", self.as_fen())
    }
}

impl FromStr for Pieces {
    type Err = PlacementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pieces::from_fen(s)
    }
}
