//! Fixed pool of reusable byte blocks.

/// Index of a block in its pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(u32);

impl BlockId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One pool block.
#[derive(Debug)]
pub struct Block {
    buf: Vec<u8>,
    used: usize,
    active: bool,
    pinned: bool,
    owner: Option<&'static str>,
}

impl Block {
    fn with_capacity(size: usize) -> Self {
        Block {
            buf: vec![0; size],
            used: 0,
            active: false,
            pinned: false,
            owner: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes requested by the current occupant.
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Type name of the current occupant.
    pub fn owner(&self) -> Option<&'static str> {
        self.owner
    }
}

/// Pool of byte blocks with reuse of inactive blocks.
#[derive(Debug)]
pub struct BlockPool {
    blocks: Vec<Block>,
    inactive: Vec<u32>,
    block_size: usize,
    reused: u64,
}

impl BlockPool {
    /// Pre-allocate `initial_blocks` inactive blocks of `block_size` bytes.
    pub fn new(initial_blocks: usize, block_size: usize) -> Self {
        let blocks: Vec<Block> = (0..initial_blocks)
            .map(|_| Block::with_capacity(block_size))
            .collect();
        let inactive = (0..initial_blocks)
            .map(|i| u32::try_from(i).unwrap_or(u32::MAX))
            .collect();
        BlockPool {
            blocks,
            inactive,
            block_size,
            reused: 0,
        }
    }

    /// Hand out a block of at least `size` bytes.
    ///
    /// Reuses the smallest inactive block that fits; otherwise grows the
    /// pool by one block of `max(size, block_size)` bytes.
    pub fn create_block(&mut self, size: usize, owner: &'static str) -> BlockId {
        let best = self
            .inactive
            .iter()
            .enumerate()
            .filter(|&(_, &idx)| self.blocks[idx as usize].capacity() >= size)
            .min_by_key(|&(_, &idx)| self.blocks[idx as usize].capacity())
            .map(|(pos, _)| pos);

        let index = if let Some(pos) = best {
            self.reused += 1;
            self.inactive.swap_remove(pos)
        } else {
            let index = u32::try_from(self.blocks.len())
                .unwrap_or_else(|_| panic!("block pool exceeded {} blocks", u32::MAX));
            self.blocks
                .push(Block::with_capacity(size.max(self.block_size)));
            index
        };

        let block = &mut self.blocks[index as usize];
        debug_assert!(!block.active, "handed out an active block");
        block.active = true;
        block.used = size;
        block.owner = Some(owner);
        BlockId(index)
    }

    /// Return a block to the pool. Pinned blocks are left untouched and
    /// `false` is returned.
    ///
    /// Panics if the block is not active (double free).
    pub fn free_block(&mut self, id: BlockId) -> bool {
        let block = self.block_mut(id);
        assert!(block.active, "double free of block {}", id.index());
        if block.pinned {
            return false;
        }
        block.buf.fill(0);
        block.active = false;
        block.used = 0;
        block.owner = None;
        self.inactive.push(id.0);
        true
    }

    /// Make an active block permanent.
    pub fn pin(&mut self, id: BlockId) {
        let block = self.block_mut(id);
        assert!(block.active, "cannot pin inactive block {}", id.index());
        block.pinned = true;
    }

    pub fn block(&self, id: BlockId) -> &Block {
        match self.blocks.get(id.index()) {
            Some(block) => block,
            None => panic!("block index {} out of range", id.index()),
        }
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        match self.blocks.get_mut(id.index()) {
            Some(block) => block,
            None => panic!("block index {} out of range", id.index()),
        }
    }

    /// Bytes requested by all active blocks.
    pub fn mem_allocated(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.active)
            .map(|b| b.used)
            .sum()
    }

    /// Total bytes owned by the pool, active or not.
    pub fn capacity(&self) -> usize {
        self.blocks.iter().map(Block::capacity).sum()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn active_count(&self) -> usize {
        self.blocks.len() - self.inactive.len()
    }

    /// How many allocations were served from an inactive block.
    pub fn reused_count(&self) -> u64 {
        self.reused
    }
}

#[cfg(test)]
mod tests;
