use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::errors::RowlandError;
use crate::Result;

/// One photon as a row of a [`PhotonBatch`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotonRecord {
    pub pos: Vector3<f64>,
    pub dir: Vector3<f64>,
    pub probability: f64,
    pub mirror_shell: i64,
}

/// Columnar photon list.
///
/// All columns have the same length; row `i` of every column describes the
/// same photon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotonBatch {
    pos: Vec<Vector3<f64>>,
    dir: Vec<Vector3<f64>>,
    probability: Vec<f64>,
    mirror_shell: Vec<i64>,
}

impl PhotonBatch {
    /// Build a batch from its columns.
    ///
    /// # Errors
    /// `MalformedInput` if the columns differ in length
    pub fn new(
        pos: Vec<Vector3<f64>>,
        dir: Vec<Vector3<f64>>,
        probability: Vec<f64>,
        mirror_shell: Vec<i64>,
    ) -> Result<Self> {
        let n = pos.len();
        if dir.len() != n || probability.len() != n || mirror_shell.len() != n {
            return Err(RowlandError::malformed(format!(
                "Photon columns must have equal length, got pos={}, dir={}, probability={}, mirror_shell={}.",
                n,
                dir.len(),
                probability.len(),
                mirror_shell.len()
            )));
        }
        Ok(PhotonBatch {
            pos,
            dir,
            probability,
            mirror_shell,
        })
    }

    pub fn from_rows(rows: &[PhotonRecord]) -> Self {
        PhotonBatch {
            pos: rows.iter().map(|r| r.pos).collect(),
            dir: rows.iter().map(|r| r.dir).collect(),
            probability: rows.iter().map(|r| r.probability).collect(),
            mirror_shell: rows.iter().map(|r| r.mirror_shell).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    pub fn pos(&self) -> &[Vector3<f64>] {
        &self.pos
    }

    pub fn dir(&self) -> &[Vector3<f64>] {
        &self.dir
    }

    pub fn probability(&self) -> &[f64] {
        &self.probability
    }

    pub fn mirror_shell(&self) -> &[i64] {
        &self.mirror_shell
    }
}
