//! # Ring Grid
//!
//! A fixed `size × size` grid addressed by unbounded logical `(x, z)`
//! coordinates. The grid covers the half-open window
//! `[origin, origin + size)` on both axes and maps a coordinate to storage
//! with `(coord - origin + offset) mod size`.
//!
//! Shifting the window by one moves the origin and rotates the offset; no
//! slot is moved. After a shift, the slots of the column (or row) that left
//! the window are exactly the slots of the column (or row) that entered it,
//! still holding the departed contents until the caller takes them.

/// Direction of a one-chunk window shift.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shift {
    /// Towards +x.
    Right,
    /// Towards -x.
    Left,
    /// Towards +z.
    Front,
    /// Towards -z.
    Back,
}

impl Shift {
    /// All four directions.
    pub fn all() -> [Shift; 4] {
        [Shift::Right, Shift::Left, Shift::Front, Shift::Back]
    }

    /// The direction that undoes this one.
    pub fn opposite(self) -> Shift {
        match self {
            Shift::Right => Shift::Left,
            Shift::Left => Shift::Right,
            Shift::Front => Shift::Back,
            Shift::Back => Shift::Front,
        }
    }
}

/// Two-dimensional ring buffer of optional values.
#[derive(Clone, Debug)]
pub struct RingGrid<T> {
    size: usize,
    x_origin: i32,
    z_origin: i32,
    x_offset: usize,
    z_offset: usize,
    slots: Vec<Option<T>>,
}

impl<T> RingGrid<T> {
    /// Creates an empty grid covering `[origin, origin + size)`.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize, x_origin: i32, z_origin: i32) -> Self {
        assert!(size > 0, "ring grid needs at least one slot");
        RingGrid {
            size,
            x_origin,
            z_origin,
            x_offset: 0,
            z_offset: 0,
            slots: std::iter::repeat_with(|| None).take(size * size).collect(),
        }
    }

    /// Side length of the window.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Logical x of the window's lower corner.
    pub fn origin_x(&self) -> i32 {
        self.x_origin
    }

    /// Logical z of the window's lower corner.
    pub fn origin_z(&self) -> i32 {
        self.z_origin
    }

    /// Half-open bound test on both axes.
    pub fn contains(&self, x: i32, z: i32) -> bool {
        let size = self.size as i64;
        let (dx, dz) = (
            x as i64 - self.x_origin as i64,
            z as i64 - self.z_origin as i64,
        );
        (0..size).contains(&dx) && (0..size).contains(&dz)
    }

    /// Storage index of an in-window coordinate, `None` outside the window.
    pub fn slot_index(&self, x: i32, z: i32) -> Option<usize> {
        if !self.contains(x, z) {
            return None;
        }
        let sx = ((x - self.x_origin) as usize + self.x_offset) % self.size;
        let sz = ((z - self.z_origin) as usize + self.z_offset) % self.size;
        Some(sx * self.size + sz)
    }

    /// The value at `(x, z)`; `None` for empty slots and outside the window.
    pub fn get(&self, x: i32, z: i32) -> Option<&T> {
        self.slot_index(x, z).and_then(|idx| self.slots[idx].as_ref())
    }

    /// Stores `value` at an in-window coordinate, returning what was there.
    ///
    /// # Panics
    /// Panics if `(x, z)` is outside the window; callers check `contains` first.
    pub fn set(&mut self, x: i32, z: i32, value: Option<T>) -> Option<T> {
        match self.slot_index(x, z) {
            Some(idx) => std::mem::replace(&mut self.slots[idx], value),
            None => panic!(
                "({x}, {z}) outside window origin ({}, {}) size {}",
                self.x_origin, self.z_origin, self.size
            ),
        }
    }

    /// Empties the slot at `(x, z)`; `None` outside the window.
    pub fn take(&mut self, x: i32, z: i32) -> Option<T> {
        let idx = self.slot_index(x, z)?;
        self.slots[idx].take()
    }

    /// Moves the window one step. Slot contents are untouched.
    pub fn shift(&mut self, direction: Shift) {
        let size = self.size;
        match direction {
            Shift::Right => {
                self.x_offset = (self.x_offset + 1) % size;
                self.x_origin += 1;
            }
            Shift::Left => {
                self.x_offset = (self.x_offset + size - 1) % size;
                self.x_origin -= 1;
            }
            Shift::Front => {
                self.z_offset = (self.z_offset + 1) % size;
                self.z_origin += 1;
            }
            Shift::Back => {
                self.z_offset = (self.z_offset + size - 1) % size;
                self.z_origin -= 1;
            }
        }
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Every occupied in-window coordinate with its value.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, &T)> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |dz| {
            (0..size).filter_map(move |dx| {
                let (x, z) = (self.x_origin + dx, self.z_origin + dz);
                self.get(x, z).map(|value| (x, z, value))
            })
        })
    }
}
