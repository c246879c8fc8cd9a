//! Dense `f64` vector with truncating binary operations.
//!
//! Every binary operation (`add`, `sub`, `dot`) works over the common prefix
//! `0..min(len_a, len_b)`. Ragged operands are never an error: the longer
//! operand's tail is ignored.
//!
//! ```
//! use linreg_gd::math::Vector;
//!
//! let v = 2.0 * Vector::from(vec![1.0, 1.0]) + Vector::from(vec![1.0, 2.0]);
//! assert_eq!(v.to_string(), "[3, 4]");
//! ```

use std::fmt;
use std::ops::{Index, Mul};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    elts: Vec<f64>,
}

impl Vector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elts: Vec::with_capacity(capacity),
        }
    }

    /// `[0, 1, ..., k - 1]`.
    pub fn seeded(k: usize) -> Self {
        (0..k).map(|i| i as f64).collect()
    }

    pub fn len(&self) -> usize {
        self.elts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elts.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.elts.get(i).copied()
    }

    /// Append one element. Only meant for building a vector up.
    pub fn push(&mut self, value: f64) {
        self.elts.push(value);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.elts.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.elts
    }

    pub fn is_finite(&self) -> bool {
        self.elts.iter().all(|v| v.is_finite())
    }

    /// Elementwise sum over the shared prefix.
    pub fn add(&self, other: &Vector) -> Vector {
        let n = self.len().min(other.len());
        let mut out = Vector::with_capacity(n);
        for i in 0..n {
            out.push(self.elts[i] + other.elts[i]);
        }
        out
    }

    /// Elementwise difference over the shared prefix.
    pub fn sub(&self, other: &Vector) -> Vector {
        let n = self.len().min(other.len());
        let mut out = Vector::with_capacity(n);
        for i in 0..n {
            out.push(self.elts[i] - other.elts[i]);
        }
        out
    }

    pub fn scale(&self, k: f64) -> Vector {
        self.elts.iter().map(|v| v * k).collect()
    }

    /// Dot product over the shared prefix.
    pub fn dot(&self, other: &Vector) -> f64 {
        let n = self.len().min(other.len());
        let mut acc = 0.0;
        for i in 0..n {
            acc += self.elts[i] * other.elts[i];
        }
        acc
    }
}

impl From<Vec<f64>> for Vector {
    fn from(elts: Vec<f64>) -> Self {
        Self { elts }
    }
}

impl From<&[f64]> for Vector {
    fn from(elts: &[f64]) -> Self {
        Self {
            elts: elts.to_vec(),
        }
    }
}

impl<const N: usize> From<[f64; N]> for Vector {
    fn from(elts: [f64; N]) -> Self {
        Self {
            elts: elts.to_vec(),
        }
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            elts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.elts.iter()
    }
}

impl IntoIterator for Vector {
    type Item = f64;
    type IntoIter = std::vec::IntoIter<f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.elts.into_iter()
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.elts[i]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.elts.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

impl std::ops::Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        Vector::add(self, rhs)
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::add(&self, &rhs)
    }
}

impl std::ops::Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        Vector::sub(self, rhs)
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::sub(&self, &rhs)
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        self.scale(k)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        self.scale(k)
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, v: &Vector) -> Vector {
        v.scale(self)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        v.scale(self)
    }
}

/// `&a * &b` is the (truncating) dot product.
impl Mul<&Vector> for &Vector {
    type Output = f64;

    fn mul(self, rhs: &Vector) -> f64 {
        self.dot(rhs)
    }
}
