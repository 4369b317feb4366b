use glam::Vec3;

/// World-space ray with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Nearest non-negative hit distance along the ray. A ray starting inside the
/// sphere reports its exit point.
#[inline]
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let near = -b - sq;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sq;
    (far >= 0.0).then_some(far)
}

/// Hit against a finite upright cylinder (side wall and both caps).
pub fn ray_vertical_cylinder(ray: &Ray, base: Vec3, radius: f32, height: f32) -> Option<f32> {
    let top = base.y + height;
    let mut best: Option<f32> = None;
    let mut keep = |t: f32| {
        if t >= 0.0 && best.map_or(true, |b| t < b) {
            best = Some(t);
        }
    };

    // side: solve |(o + t d - base).xz| = radius
    let ox = ray.origin.x - base.x;
    let oz = ray.origin.z - base.z;
    let a = ray.dir.x * ray.dir.x + ray.dir.z * ray.dir.z;
    if a > 1e-8 {
        let b = ox * ray.dir.x + oz * ray.dir.z;
        let c = ox * ox + oz * oz - radius * radius;
        let disc = b * b - a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for t in [(-b - sq) / a, (-b + sq) / a] {
                let y = ray.origin.y + ray.dir.y * t;
                if y >= base.y && y <= top {
                    keep(t);
                }
            }
        }
    }

    // caps
    if ray.dir.y.abs() > 1e-8 {
        for y in [base.y, top] {
            let t = (y - ray.origin.y) / ray.dir.y;
            let p = ray.at(t);
            let dx = p.x - base.x;
            let dz = p.z - base.z;
            if dx * dx + dz * dz <= radius * radius {
                keep(t);
            }
        }
    }
    best
}

/// Hit against a horizontal annulus lying in the plane `y = center.y`.
pub fn ray_annulus(ray: &Ray, center: Vec3, inner: f32, outer: f32) -> Option<f32> {
    if ray.dir.y.abs() <= 1e-8 {
        return None;
    }
    let t = (center.y - ray.origin.y) / ray.dir.y;
    if t < 0.0 {
        return None;
    }
    let p = ray.at(t);
    let d2 = (p.x - center.x).powi(2) + (p.z - center.z).powi(2);
    (d2 >= inner * inner && d2 <= outer * outer).then_some(t)
}

/// Pick volume of one marker part in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bounds {
    Sphere { center: Vec3, radius: f32 },
    Cylinder { base: Vec3, radius: f32, height: f32 },
    Annulus { center: Vec3, inner: f32, outer: f32 },
}

impl Bounds {
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            Bounds::Sphere { center, radius } => ray_sphere(ray, center, radius),
            Bounds::Cylinder {
                base,
                radius,
                height,
            } => ray_vertical_cylinder(ray, base, radius, height),
            Bounds::Annulus {
                center,
                inner,
                outer,
            } => ray_annulus(ray, center, inner, outer),
        }
    }
}
