#![allow(dead_code)]
use morse_homology::algs::differential::BoundaryTable;
use morse_homology::grading::Graded;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub type Gen = Graded<u32>;

/// A random chain complex with `d² = 0` and known homology.
pub struct RandomComplex {
    pub generators: Vec<Gen>,
    pub differential: BoundaryTable<Gen>,
    /// Expected `(inner, outer, rank)` triples, nonzero only.
    pub ranks: Vec<(i32, i32, usize)>,
}

type Mat = Vec<Vec<bool>>;

fn identity(n: usize) -> Mat {
    (0..n).map(|i| (0..n).map(|j| i == j).collect()).collect()
}

fn mul(a: &Mat, b: &Mat, inner: usize, cols: usize) -> Mat {
    a.iter()
        .map(|row| {
            (0..cols)
                .map(|j| (0..inner).filter(|&l| row[l] && b[l][j]).count() % 2 == 1)
                .collect()
        })
        .collect()
}

/// Random invertible `n × n` matrix over GF(2) together with its inverse.
fn random_basis_change(rng: &mut SmallRng, n: usize) -> (Mat, Mat) {
    let (mut u, mut v) = (identity(n), identity(n));
    if n < 2 {
        return (u, v);
    }
    for _ in 0..(3 * n) {
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        if i == j {
            continue;
        }
        // u <- E u adds row j to row i; v <- v E adds column i to column j
        for c in 0..n {
            let x = u[j][c];
            u[i][c] ^= x;
        }
        for r in 0..n {
            let x = v[r][i];
            v[r][j] ^= x;
        }
    }
    (u, v)
}

/// Build a complex in one outer degree with `sizes[i]` generators in inner
/// degree `base + i`.
///
/// A random matching of generators across adjacent degrees is drawn first
/// (each matched pair kills two ranks), then every degree is put through a
/// random change of basis so the differential is dense.
pub fn random_complex(seed: u64, outer: i32, base: i32, sizes: &[usize]) -> RandomComplex {
    let mut rng = SmallRng::seed_from_u64(seed);
    let top = sizes.len();
    let mut canonical: Vec<Mat> = Vec::with_capacity(top);
    let mut paired: Vec<Vec<bool>> = sizes.iter().map(|&n| vec![false; n]).collect();
    canonical.push(Vec::new());
    for k in 1..top {
        canonical.push(vec![vec![false; sizes[k - 1]]; sizes[k]]);
    }
    for k in (1..top).rev() {
        let mut free: Vec<usize> = (0..sizes[k]).filter(|&i| !paired[k][i]).collect();
        let mut below: Vec<usize> = (0..sizes[k - 1]).collect();
        free.shuffle(&mut rng);
        below.shuffle(&mut rng);
        let m = rng.gen_range(0..=free.len().min(below.len()));
        for (&i, &j) in free.iter().zip(&below).take(m) {
            canonical[k][i][j] = true;
            paired[k][i] = true;
            paired[k - 1][j] = true;
        }
    }

    let changes: Vec<(Mat, Mat)> =
        sizes.iter().map(|&n| random_basis_change(&mut rng, n)).collect();

    let mut next_id = 0u32;
    let layers: Vec<Vec<Gen>> = sizes
        .iter()
        .enumerate()
        .map(|(k, &n)| {
            (0..n)
                .map(|_| {
                    next_id += 1;
                    Graded::new(next_id, outer, base + k as i32)
                })
                .collect()
        })
        .collect();

    let mut differential = BoundaryTable::new();
    for k in 1..top {
        let (u, _) = &changes[k];
        let (_, v) = &changes[k - 1];
        let ud = mul(u, &canonical[k], sizes[k], sizes[k - 1]);
        let d = mul(&ud, v, sizes[k - 1], sizes[k - 1]);
        for (i, row) in d.iter().enumerate() {
            differential.insert(
                layers[k][i].clone(),
                row.iter()
                    .enumerate()
                    .filter(|&(_, &hit)| hit)
                    .map(|(j, _)| layers[k - 1][j].clone()),
            );
        }
    }

    let ranks = paired
        .iter()
        .enumerate()
        .map(|(k, p)| (base + k as i32, outer, p.iter().filter(|&&b| !b).count()))
        .filter(|&(_, _, n)| n > 0)
        .collect();

    RandomComplex {
        generators: layers.into_iter().flatten().collect(),
        differential,
        ranks,
    }
}

/// Arbitrary edges between adjacent inner degrees, `d² = 0` not guaranteed.
pub fn random_layers(seed: u64, outer: i32, sizes: &[usize], p: f64) -> (Vec<Gen>, BoundaryTable<Gen>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut next_id = 0u32;
    let layers: Vec<Vec<Gen>> = sizes
        .iter()
        .enumerate()
        .map(|(k, &n)| {
            (0..n)
                .map(|_| {
                    next_id += 1;
                    Graded::new(next_id, outer, k as i32)
                })
                .collect()
        })
        .collect();
    let mut d = BoundaryTable::new();
    for k in 1..layers.len() {
        for x in &layers[k] {
            let hits: Vec<Gen> = layers[k - 1]
                .iter()
                .filter(|_| rng.gen_bool(p))
                .cloned()
                .collect();
            d.insert(x.clone(), hits);
        }
    }
    (layers.into_iter().flatten().collect(), d)
}

/// Merge several boundary tables over disjoint generator sets.
pub fn union(tables: Vec<(Vec<Gen>, BoundaryTable<Gen>)>) -> (Vec<Gen>, BoundaryTable<Gen>) {
    let mut gens = Vec::new();
    let mut d = BoundaryTable::new();
    for (gs, table) in tables {
        for x in &gs {
            d.insert(x.clone(), morse_homology::algs::Differential::apply(&table, x));
        }
        gens.extend(gs);
    }
    (gens, d)
}
