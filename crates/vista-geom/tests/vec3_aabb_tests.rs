use vista_geom::{Aabb, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_zero() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-6));
    assert_eq!(Vec3::default(), Vec3::ZERO);
}

#[test]
fn vec3_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    assert!(vec3_approx_eq(a + b, Vec3::new(-3.0, 7.0, -3.0), 1e-6));
    assert!(vec3_approx_eq((a + b) - a, b, 1e-6));

    let mut v = a;
    v += b;
    v -= a;
    assert!(vec3_approx_eq(v, b, 1e-6));
    assert!(vec3_approx_eq((a * 2.0) / 2.0, a, 1e-6));
}

#[test]
fn normalized_zero_is_noop() {
    let zn = Vec3::ZERO.normalized();
    assert!(vec3_approx_eq(zn, Vec3::ZERO, 1e-6));
    let n = Vec3::new(3.0, 4.0, 0.0).normalized();
    assert!(vec3_approx_eq(n, Vec3::new(0.6, 0.8, 0.0), 1e-6));
}

#[test]
fn cross_of_basis() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-6));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-6));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-6));
}

#[test]
fn planar_helpers_ignore_height() {
    let v = Vec3::new(3.0, 100.0, 4.0);
    assert!(approx_eq(v.planar_length(), 5.0, 1e-6));
    assert!(vec3_approx_eq(v.planar(), Vec3::new(3.0, 0.0, 4.0), 1e-6));
}

#[test]
fn aabb_from_center_size() {
    let bb = Aabb::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.8, 2.0, 0.8));
    assert!(vec3_approx_eq(bb.min, Vec3::new(0.6, 1.0, 2.6), 1e-6));
    assert!(vec3_approx_eq(bb.max, Vec3::new(1.4, 3.0, 3.4), 1e-6));
    assert!(vec3_approx_eq(bb.center(), Vec3::new(1.0, 2.0, 3.0), 1e-6));
    assert!(vec3_approx_eq(bb.size(), Vec3::new(0.8, 2.0, 0.8), 1e-6));
}

#[test]
fn aabb_enclosing_points() {
    assert!(Aabb::enclosing(std::iter::empty()).is_none());
    let bb = Aabb::enclosing([
        Vec3::new(0.0, -5.0, 2.0),
        Vec3::new(4.0, 1.0, -1.0),
        Vec3::new(2.0, 9.0, 0.0),
    ])
    .unwrap();
    assert!(vec3_approx_eq(bb.min, Vec3::new(0.0, -5.0, -1.0), 1e-6));
    assert!(vec3_approx_eq(bb.max, Vec3::new(4.0, 9.0, 2.0), 1e-6));
}
