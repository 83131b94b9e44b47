//! In-memory level the simulated players click on.

use blockmenu_plugin_api::{BlockId, PluginBlockPos, BLOCK_AIR, BLOCK_INVALID};

const STONE: BlockId = 1;
const GRASS: BlockId = 2;
const DIRT: BlockId = 3;

/// Fixed-size block grid indexed as `(y * length + z) * width + x`.
pub struct World {
    width: u16,
    height: u16,
    length: u16,
    blocks: Vec<BlockId>,
}

impl World {
    /// Lower half filled (stone, then three layers of dirt, grass on top).
    pub fn flat(width: u16, height: u16, length: u16) -> Self {
        let mut world = Self {
            width,
            height,
            length,
            blocks: vec![BLOCK_AIR; width as usize * height as usize * length as usize],
        };
        let surface = height / 2;
        for y in 0..surface {
            let block = if y + 1 == surface {
                GRASS
            } else if y + 4 >= surface {
                DIRT
            } else {
                STONE
            };
            for z in 0..length {
                for x in 0..width {
                    world.set_block(PluginBlockPos { x, y, z }, block);
                }
            }
        }
        world
    }

    pub fn dimensions(&self) -> (u16, u16, u16) {
        (self.width, self.height, self.length)
    }

    fn index(&self, pos: PluginBlockPos) -> Option<usize> {
        if pos.x >= self.width || pos.y >= self.height || pos.z >= self.length {
            return None;
        }
        let (x, y, z) = (pos.x as usize, pos.y as usize, pos.z as usize);
        Some((y * self.length as usize + z) * self.width as usize + x)
    }

    /// Block at `pos`, or [`BLOCK_INVALID`] outside the level.
    pub fn get_block(&self, pos: PluginBlockPos) -> BlockId {
        self.index(pos)
            .map(|i| self.blocks[i])
            .unwrap_or(BLOCK_INVALID)
    }

    /// Returns `false` when `pos` is outside the level.
    pub fn set_block(&mut self, pos: PluginBlockPos, block: BlockId) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.blocks[i] = block;
                true
            }
            None => false,
        }
    }
}
