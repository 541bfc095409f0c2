use crate::engine::aligner::{Aligner, AlignerError, AlignerOutput};
use crate::engine::cache::MemoryCache;
use crate::engine::comparator::StructuralComparator;
use crate::engine::simulation::Simulator;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const REPORT: &str = "\
Aligned length= 310, RMSD=   2.05, Seq_ID=n_identical/n_aligned= 0.640
TM-score= 0.81234 (normalized by length of Structure_1: L=340, d0=6.12)
";

pub struct ScriptedAligner {
    available: bool,
    succeeds: bool,
    invocations: AtomicUsize,
}

impl ScriptedAligner {
    pub fn measuring() -> Self {
        Self {
            available: true,
            succeeds: true,
            invocations: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::measuring()
        }
    }

    pub fn failing() -> Self {
        Self {
            succeeds: false,
            ..Self::measuring()
        }
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl Aligner for ScriptedAligner {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn run(&self, _reference: &Path, _target: &Path) -> Result<AlignerOutput, AlignerError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if self.succeeds {
            Ok(AlignerOutput {
                stdout: REPORT.to_string(),
                stderr: String::new(),
            })
        } else {
            Err(AlignerError::Timeout {
                executable: "scripted".to_string(),
                timeout: std::time::Duration::from_secs(30),
            })
        }
    }
}

/// A comparator rooted at `root`, with `ref.pdb` and `target.pdb` present.
pub fn comparator_in(
    root: &Path,
    aligner: ScriptedAligner,
) -> StructuralComparator<ScriptedAligner, MemoryCache> {
    for name in ["ref.pdb", "target.pdb"] {
        fs::write(root.join(name), "ATOM").unwrap();
    }
    StructuralComparator::new(
        aligner,
        MemoryCache::new(),
        Simulator::new(Some(5)),
        root.to_path_buf(),
    )
}
