//! # Terrain Generation
//!
//! Procedural height-map terrain. The surface height of every block column is
//! sampled from 2D Perlin noise; below the surface come grass, dirt and then
//! stone. Generation is a pure function of the chunk coordinate and the
//! [`TerrainConfig`], so it cannot fail and can run on any worker thread.

use cgmath::Point2;
use noise::{NoiseFn, Perlin};

use crate::core::config::TerrainConfig;

use super::block::block_type::BlockType;
use super::chunk::{BlockGrid, CHUNK_WIDTH, SUB_CHUNKS_PER_CHUNK, SUB_CHUNK_HEIGHT, WORLD_HEIGHT};

/// Samples terrain for chunk columns.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    perlin: Perlin,
    config: TerrainConfig,
}

impl TerrainGenerator {
    /// Creates a generator seeded from `config.seed`.
    pub fn new(config: TerrainConfig) -> Self {
        TerrainGenerator {
            perlin: Perlin::new(config.seed),
            config,
        }
    }

    /// Height of the topmost solid block of the column at world block `(x, z)`.
    pub fn surface_height(&self, world_x: i32, world_z: i32) -> i32 {
        let sample = self.perlin.get([
            world_x as f64 * self.config.scale,
            world_z as f64 * self.config.scale,
        ]);
        let offset = (sample.clamp(-1.0, 1.0) * self.config.amplitude).round() as i32;
        (self.config.base_height + offset).clamp(0, WORLD_HEIGHT as i32 - 1)
    }

    /// The block at height `y` in a column whose surface is at `surface`.
    pub fn block_at(&self, surface: i32, y: i32) -> BlockType {
        if y > surface {
            BlockType::AIR
        } else if y == surface {
            BlockType::GRASS
        } else if y >= surface - self.config.dirt_depth {
            BlockType::DIRT
        } else {
            BlockType::STONE
        }
    }

    /// Fills every sub-chunk grid of the chunk at `position`, bottom first.
    pub fn generate_chunk(&self, position: Point2<i32>) -> Vec<BlockGrid> {
        let base_x = position.x * CHUNK_WIDTH as i32;
        let base_z = position.y * CHUNK_WIDTH as i32;

        let mut heights = [[0i32; CHUNK_WIDTH]; CHUNK_WIDTH];
        for (z, row) in heights.iter_mut().enumerate() {
            for (x, height) in row.iter_mut().enumerate() {
                *height = self.surface_height(base_x + x as i32, base_z + z as i32);
            }
        }

        (0..SUB_CHUNKS_PER_CHUNK)
            .map(|level| {
                let mut grid = BlockGrid::empty();
                let level_base = (level * SUB_CHUNK_HEIGHT) as i32;
                for (z, row) in heights.iter().enumerate() {
                    for (x, &surface) in row.iter().enumerate() {
                        // columns never reach above their surface
                        let top = (surface - level_base + 1).clamp(0, SUB_CHUNK_HEIGHT as i32);
                        for y in 0..top {
                            grid.set(x, y as usize, z, self.block_at(surface, level_base + y));
                        }
                    }
                }
                grid
            })
            .collect()
    }
}
