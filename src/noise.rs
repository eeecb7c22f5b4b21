//! Coherent gradient noise (2D and 3D simplex).
//!
//! Lattice gradients are picked by an integer hash of the cell corner, so
//! there is no permutation table and no RNG state: the output is a pure
//! function of the input coordinates. Both variants return values in
//! roughly `[-1, 1]` and are C¹ across simplex boundaries.

const SEED: u32 = 0x5EED_0A11;

const F2: f32 = 0.366_025_42; // (sqrt(3) - 1) / 2
const G2: f32 = 0.211_324_87; // (3 - sqrt(3)) / 6
const F3: f32 = 1.0 / 3.0;
const G3: f32 = 1.0 / 6.0;

const GRAD2: [(f32, f32); 8] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

const GRAD3: [(f32, f32, f32); 12] = [
    (1.0, 1.0, 0.0),
    (-1.0, 1.0, 0.0),
    (1.0, -1.0, 0.0),
    (-1.0, -1.0, 0.0),
    (1.0, 0.0, 1.0),
    (-1.0, 0.0, 1.0),
    (1.0, 0.0, -1.0),
    (-1.0, 0.0, -1.0),
    (0.0, 1.0, 1.0),
    (0.0, -1.0, 1.0),
    (0.0, 1.0, -1.0),
    (0.0, -1.0, -1.0),
];

fn hash_u32(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

fn hash2(x: i32, y: i32) -> u32 {
    hash_u32(SEED ^ (x as u32).wrapping_mul(0x9e37_79b1) ^ (y as u32).wrapping_mul(0x85eb_ca6b))
}

fn hash3(x: i32, y: i32, z: i32) -> u32 {
    hash_u32(
        SEED ^ (x as u32).wrapping_mul(0x9e37_79b1)
            ^ (y as u32).wrapping_mul(0x85eb_ca6b)
            ^ (z as u32).wrapping_mul(0xc2b2_ae35),
    )
}

#[inline]
fn corner2(i: i32, j: i32, x: f32, y: f32) -> f32 {
    let t = 0.5 - x * x - y * y;
    if t <= 0.0 {
        return 0.0;
    }
    let (gx, gy) = GRAD2[(hash2(i, j) % 8) as usize];
    let t2 = t * t;
    t2 * t2 * (gx * x + gy * y)
}

#[inline]
fn corner3(i: i32, j: i32, k: i32, x: f32, y: f32, z: f32) -> f32 {
    let t = 0.6 - x * x - y * y - z * z;
    if t <= 0.0 {
        return 0.0;
    }
    let (gx, gy, gz) = GRAD3[(hash3(i, j, k) % 12) as usize];
    let t2 = t * t;
    t2 * t2 * (gx * x + gy * y + gz * z)
}

/// 2D simplex noise in roughly `[-1, 1]`.
pub fn noise2(x: f32, y: f32) -> f32 {
    let s = (x + y) * F2;
    let i = (x + s).floor() as i32;
    let j = (y + s).floor() as i32;

    let t = (i.wrapping_add(j)) as f32 * G2;
    let x0 = x - (i as f32 - t);
    let y0 = y - (j as f32 - t);

    let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - i1 as f32 + G2;
    let y1 = y0 - j1 as f32 + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let n = corner2(i, j, x0, y0)
        + corner2(i.wrapping_add(i1), j.wrapping_add(j1), x1, y1)
        + corner2(i.wrapping_add(1), j.wrapping_add(1), x2, y2);
    68.0 * n
}

/// 3D simplex noise in roughly `[-1, 1]`.
pub fn noise3(x: f32, y: f32, z: f32) -> f32 {
    let s = (x + y + z) * F3;
    let i = (x + s).floor() as i32;
    let j = (y + s).floor() as i32;
    let k = (z + s).floor() as i32;

    let t = (i.wrapping_add(j).wrapping_add(k)) as f32 * G3;
    let x0 = x - (i as f32 - t);
    let y0 = y - (j as f32 - t);
    let z0 = z - (k as f32 - t);

    // Which of the six tetrahedra of the skewed cube we are in.
    let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
        if y0 >= z0 {
            (1, 0, 0, 1, 1, 0)
        } else if x0 >= z0 {
            (1, 0, 0, 1, 0, 1)
        } else {
            (0, 0, 1, 1, 0, 1)
        }
    } else if y0 < z0 {
        (0, 0, 1, 0, 1, 1)
    } else if x0 < z0 {
        (0, 1, 0, 0, 1, 1)
    } else {
        (0, 1, 0, 1, 1, 0)
    };

    let x1 = x0 - i1 as f32 + G3;
    let y1 = y0 - j1 as f32 + G3;
    let z1 = z0 - k1 as f32 + G3;
    let x2 = x0 - i2 as f32 + 2.0 * G3;
    let y2 = y0 - j2 as f32 + 2.0 * G3;
    let z2 = z0 - k2 as f32 + 2.0 * G3;
    let x3 = x0 - 1.0 + 3.0 * G3;
    let y3 = y0 - 1.0 + 3.0 * G3;
    let z3 = z0 - 1.0 + 3.0 * G3;

    let n = corner3(i, j, k, x0, y0, z0)
        + corner3(
            i.wrapping_add(i1),
            j.wrapping_add(j1),
            k.wrapping_add(k1),
            x1,
            y1,
            z1,
        )
        + corner3(
            i.wrapping_add(i2),
            j.wrapping_add(j2),
            k.wrapping_add(k2),
            x2,
            y2,
            z2,
        )
        + corner3(
            i.wrapping_add(1),
            j.wrapping_add(1),
            k.wrapping_add(1),
            x3,
            y3,
            z3,
        );
    32.0 * n
}
