//! Location markers: one composite pin per location, an explicit part index
//! for hit-testing, and per-frame hover/bob/pulse animation.
//!
//! Parts never carry location data. A hit on any part resolves to its owning
//! marker through the `PartId -> MarkerId` index, and only the marker knows
//! which location it stands for.

use crate::config::{Location, Palette};
use crate::constants::*;
use crate::ray::{Bounds, Ray};
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    Body,
    Pointer,
    GroundRing,
    PulseRing,
}

impl PartKind {
    pub const ALL: [PartKind; 4] = [
        PartKind::Body,
        PartKind::Pointer,
        PartKind::GroundRing,
        PartKind::PulseRing,
    ];

    /// Local height of the part's origin at rest.
    pub fn rest_offset(self) -> f32 {
        match self {
            PartKind::Body => MARKER_BODY_HEIGHT,
            PartKind::Pointer => MARKER_POINTER_BASE,
            PartKind::GroundRing => MARKER_RING_Y,
            PartKind::PulseRing => MARKER_PULSE_Y,
        }
    }

    #[inline]
    fn bobs(self) -> bool {
        matches!(self, PartKind::Body | PartKind::Pointer)
    }
}

#[derive(Clone, Debug)]
pub struct MarkerPart {
    pub id: PartId,
    pub kind: PartKind,
    pub owner: MarkerId,
    /// Current local height of the part origin.
    pub offset_y: f32,
    /// Extra radial scale (pulse ring expansion).
    pub spread: f32,
    pub opacity: f32,
    base_offset: Option<f32>,
}

impl MarkerPart {
    /// Height cached on the first animation pass, `None` before it.
    #[inline]
    pub fn base_offset(&self) -> Option<f32> {
        self.base_offset
    }

    /// Faded pulse rings are excluded from picking.
    #[inline]
    pub fn pickable(&self) -> bool {
        self.kind != PartKind::PulseRing || self.opacity >= PULSE_PICK_MIN_OPACITY
    }
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub id: MarkerId,
    /// Index into the configured location list.
    pub location: usize,
    pub location_id: &'static str,
    pub position: Vec3,
    pub color: [f32; 3],
    pub scale: f32,
    pub emissive_intensity: f32,
    pub parts: SmallVec<[PartId; 4]>,
    phase: f32,
}

/// Nearest marker under a ray and the part that was hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerHit {
    pub marker: MarkerId,
    pub part: PartId,
    pub distance: f32,
}

/// Per-part draw data for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartInstance {
    pub kind: PartKind,
    pub model: Mat4,
    pub color: [f32; 4],
    pub emissive: f32,
}

#[derive(Clone, Debug, Default)]
pub struct MarkerRegistry {
    markers: Vec<Marker>,
    parts: Vec<MarkerPart>,
    part_owner: FnvHashMap<PartId, MarkerId>,
    part_slot: FnvHashMap<PartId, usize>,
}

impl MarkerRegistry {
    pub fn new(locations: &[Location], palette: &Palette, emissive_intensity: f32) -> Self {
        let mut reg = Self::default();
        let mut next_part = 1u32;
        for (i, loc) in locations.iter().enumerate() {
            let id = MarkerId(i);
            let mut parts = SmallVec::new();
            for kind in PartKind::ALL {
                let pid = PartId(next_part);
                next_part += 1;
                reg.part_owner.insert(pid, id);
                reg.part_slot.insert(pid, reg.parts.len());
                reg.parts.push(MarkerPart {
                    id: pid,
                    kind,
                    owner: id,
                    offset_y: kind.rest_offset(),
                    spread: 1.0,
                    opacity: if kind == PartKind::PulseRing {
                        PULSE_START_OPACITY
                    } else {
                        1.0
                    },
                    base_offset: None,
                });
                parts.push(pid);
            }
            reg.markers.push(Marker {
                id,
                location: i,
                location_id: loc.id,
                position: loc.ground_position(),
                color: palette.marker_color(loc.category),
                scale: IDLE_SCALE,
                emissive_intensity,
                parts,
                phase: i as f32 * MARKER_PHASE_STEP,
            });
        }
        log::debug!(
            "[markers] registered {} markers / {} parts",
            reg.markers.len(),
            reg.parts.len()
        );
        reg
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[inline]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[inline]
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.0)
    }

    pub fn by_location_id(&self, location_id: &str) -> Option<MarkerId> {
        self.markers
            .iter()
            .find(|m| m.location_id == location_id)
            .map(|m| m.id)
    }

    #[inline]
    pub fn owner_of(&self, part: PartId) -> Option<MarkerId> {
        self.part_owner.get(&part).copied()
    }

    pub fn part(&self, id: PartId) -> Option<&MarkerPart> {
        self.part_slot.get(&id).and_then(|&i| self.parts.get(i))
    }

    pub fn parts_of(&self, id: MarkerId) -> impl Iterator<Item = &MarkerPart> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(move |m| m.parts.iter().filter_map(move |p| self.part(*p)))
    }

    /// World-space pick volume of a part, following the owner's scale and bob.
    pub fn part_bounds(&self, part: &MarkerPart) -> Option<Bounds> {
        let m = self.get(part.owner)?;
        let s = m.scale;
        let origin = m.position + Vec3::Y * (part.offset_y * s);
        Some(match part.kind {
            PartKind::Body => Bounds::Sphere {
                center: origin,
                radius: MARKER_BODY_RADIUS * s,
            },
            PartKind::Pointer => Bounds::Cylinder {
                base: origin,
                radius: MARKER_POINTER_RADIUS * s,
                height: MARKER_POINTER_HEIGHT * s,
            },
            PartKind::GroundRing => Bounds::Annulus {
                center: origin,
                inner: MARKER_RING_INNER * s,
                outer: MARKER_RING_OUTER * s,
            },
            PartKind::PulseRing => Bounds::Annulus {
                center: origin,
                inner: MARKER_PULSE_INNER * s * part.spread,
                outer: MARKER_PULSE_OUTER * s * part.spread,
            },
        })
    }

    /// Nearest pickable marker part along `ray`, resolved to its owning marker.
    pub fn hit_test(&self, ray: &Ray) -> Option<MarkerHit> {
        let mut best: Option<(PartId, f32)> = None;
        for part in self.parts.iter().filter(|p| p.pickable()) {
            let Some(t) = self.part_bounds(part).and_then(|b| b.intersect(ray)) else {
                continue;
            };
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((part.id, t)),
            }
        }
        let (part, distance) = best?;
        let marker = self.owner_of(part)?;
        Some(MarkerHit {
            marker,
            part,
            distance,
        })
    }

    /// One animation pass: hover scale smoothing, bob and pulse.
    ///
    /// Each part's resting height is cached the first time it is animated and
    /// reused afterwards.
    pub fn animate(&mut self, time_sec: f32, hovered: Option<MarkerId>) {
        for m in &mut self.markers {
            let target = if hovered == Some(m.id) {
                HOVER_SCALE
            } else {
                IDLE_SCALE
            };
            m.scale = step_scale(m.scale, target);
        }
        for part in &mut self.parts {
            let phase = self.markers[part.owner.0].phase;
            let base = *part.base_offset.get_or_insert(part.offset_y);
            if part.kind.bobs() {
                part.offset_y =
                    base + (time_sec * MARKER_BOB_SPEED + phase).sin() * MARKER_BOB_AMPLITUDE;
            }
            if part.kind == PartKind::PulseRing {
                let cycle = pulse_cycle(time_sec, phase);
                part.spread = 1.0 + (PULSE_MAX_SCALE - 1.0) * cycle;
                part.opacity = PULSE_START_OPACITY * (1.0 - cycle);
            }
        }
    }

    pub fn set_emissive_intensity(&mut self, intensity: f32) {
        for m in &mut self.markers {
            m.emissive_intensity = intensity;
        }
    }

    /// Draw data for every part, in registration order.
    pub fn instances(&self) -> Vec<PartInstance> {
        self.parts
            .iter()
            .filter_map(|part| {
                let m = self.get(part.owner)?;
                let s = m.scale;
                let radial = if part.kind == PartKind::PulseRing {
                    s * part.spread
                } else {
                    s
                };
                let model = Mat4::from_translation(m.position + Vec3::Y * (part.offset_y * s))
                    * Mat4::from_scale(Vec3::new(radial, s, radial));
                let alpha = part.opacity;
                Some(PartInstance {
                    kind: part.kind,
                    model,
                    color: [m.color[0], m.color[1], m.color[2], alpha],
                    emissive: m.emissive_intensity,
                })
            })
            .collect()
    }
}

/// Move `current` a fixed fraction of the way toward `target`.
#[inline]
pub fn step_scale(current: f32, target: f32) -> f32 {
    current + (target - current) * HOVER_SMOOTHING
}

/// Position within the pulse cycle in `[0, 1)`.
#[inline]
fn pulse_cycle(time_sec: f32, phase: f32) -> f32 {
    let t = time_sec / PULSE_PERIOD_SEC + phase / std::f32::consts::TAU;
    t - t.floor()
}
