use crate::StrError;

/// Assigns contiguous blocks of cells to processes
///
/// Each process owns a disjoint subset of cells. Boundary classification and
/// constraint building only visit the cells owned by this process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    /// Rank of this process
    pub rank: usize,

    /// Number of processes
    pub n_process: usize,
}

impl Partition {
    /// Allocates a new instance
    pub fn new(n_process: usize, rank: usize) -> Result<Self, StrError> {
        if n_process < 1 {
            return Err("n_process must be ≥ 1");
        }
        if rank >= n_process {
            return Err("rank must be < n_process");
        }
        Ok(Partition { rank, n_process })
    }

    /// Returns the partition of a single-process run
    pub fn serial() -> Self {
        Partition { rank: 0, n_process: 1 }
    }

    /// Indicates whether this is a single-process run
    #[inline]
    pub fn is_serial(&self) -> bool {
        self.n_process == 1
    }

    /// Returns the rank owning a cell
    #[inline]
    pub fn owner(&self, cell_id: usize, n_cell: usize) -> usize {
        if n_cell == 0 {
            return 0;
        }
        (cell_id * self.n_process) / n_cell
    }

    /// Indicates whether a cell is owned by this process
    #[inline]
    pub fn is_locally_owned(&self, cell_id: usize, n_cell: usize) -> bool {
        self.owner(cell_id, n_cell) == self.rank
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
