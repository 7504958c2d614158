//! Differential oracles.
//!
//! The reduction never evaluates a differential itself. It asks a
//! [`Differential`] for the generators one inner degree lower that appear in
//! `d(x)` with nonzero coefficient. Coefficients live in characteristic 2:
//! only the presence of a term matters.
//!
//! Adapters provided here:
//! - any closure `Fn(&G) -> impl IntoIterator<Item = G>`;
//! - [`BoundaryTable`], an explicit sparse boundary map;
//! - [`Mod2`], which reduces a coefficient-valued oracle mod 2, dropping
//!   even and zero coefficients and combining repeated terms.

use std::collections::{BTreeSet, HashMap};
use std::marker::PhantomData;

use num_traits::PrimInt;

use crate::graph::GeneratorLike;

/// A pure map from a generator to the terms of its differential.
///
/// Implementations must be deterministic and side-effect free: the engine
/// may query each generator once per sweep and slices may query concurrently.
pub trait Differential<G> {
    /// Generators with nonzero coefficient in `d(x)`.
    type Image<'a>: Iterator<Item = G>
    where
        Self: 'a;

    fn apply<'a>(&'a self, x: &G) -> Self::Image<'a>;
}

impl<G, F, I> Differential<G> for F
where
    F: Fn(&G) -> I,
    I: IntoIterator<Item = G>,
{
    type Image<'a>
        = I::IntoIter
    where
        Self: 'a;

    #[inline]
    fn apply<'a>(&'a self, x: &G) -> Self::Image<'a> {
        self(x).into_iter()
    }
}

/// Explicit sparse boundary map: `x ↦ [y₁, y₂, …]`.
///
/// Generators without an entry are cycles (`d(x) = 0`).
///
/// # Example
/// ```rust
/// use morse_homology::algs::differential::{BoundaryTable, Differential};
/// let mut d = BoundaryTable::new();
/// d.insert("a", ["c"]);
/// assert_eq!(d.apply(&"a").collect::<Vec<_>>(), vec!["c"]);
/// assert_eq!(d.apply(&"c").count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct BoundaryTable<G>
where
    G: GeneratorLike,
{
    terms: HashMap<G, Vec<G>>,
}

impl<G: GeneratorLike> Default for BoundaryTable<G> {
    fn default() -> Self {
        Self {
            terms: HashMap::new(),
        }
    }
}

impl<G: GeneratorLike> BoundaryTable<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(x, y)` pairs meaning "`y` appears in `d(x)`".
    pub fn from_pairs<I: IntoIterator<Item = (G, G)>>(pairs: I) -> Self {
        let mut table = Self::new();
        for (x, y) in pairs {
            table.push(x, y);
        }
        table
    }

    /// Append `ys` to `d(x)`, skipping terms already present.
    pub fn insert<I: IntoIterator<Item = G>>(&mut self, x: G, ys: I) {
        for y in ys {
            self.push(x.clone(), y);
        }
    }

    fn push(&mut self, x: G, y: G) {
        let row = self.terms.entry(x).or_default();
        if !row.contains(&y) {
            row.push(y);
        }
    }

    /// Number of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }
}

impl<G: GeneratorLike> Differential<G> for BoundaryTable<G> {
    type Image<'a>
        = std::iter::Cloned<std::slice::Iter<'a, G>>
    where
        Self: 'a;

    fn apply<'a>(&'a self, x: &G) -> Self::Image<'a> {
        self.terms
            .get(x)
            .map(|row| row.iter().cloned())
            .unwrap_or_else(|| [].iter().cloned())
    }
}

/// Reduce a coefficient-valued oracle mod 2.
///
/// Wraps `f: Fn(&G) -> impl IntoIterator<Item = (G, C)>`. A generator
/// survives iff the sum of its coefficients is odd; the image is yielded in
/// ascending generator order.
///
/// # Example
/// ```rust
/// use morse_homology::algs::differential::{Differential, Mod2};
/// let d = Mod2::new(|_: &u8| vec![(1u8, 2i64), (2, -1), (3, 1), (3, 1), (4, 0)]);
/// assert_eq!(d.apply(&9).collect::<Vec<_>>(), vec![2]);
/// ```
pub struct Mod2<F, C> {
    f: F,
    _coefficient: PhantomData<fn() -> C>,
}

impl<F, C> Mod2<F, C> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            _coefficient: PhantomData,
        }
    }
}

impl<G, F, I, C> Differential<G> for Mod2<F, C>
where
    G: GeneratorLike,
    F: Fn(&G) -> I,
    I: IntoIterator<Item = (G, C)>,
    C: PrimInt,
{
    type Image<'a>
        = std::collections::btree_set::IntoIter<G>
    where
        Self: 'a;

    fn apply<'a>(&'a self, x: &G) -> Self::Image<'a> {
        let mut odd = BTreeSet::new();
        for (y, c) in (self.f)(x) {
            if c & C::one() == C::one() && !odd.remove(&y) {
                odd.insert(y);
            }
        }
        odd.into_iter()
    }
}
