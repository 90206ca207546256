//! Undo groups
//!
//! Each open group records the surface state at its `begin_group`.
//! Closing the outermost group pushes its state onto the undo stack, so
//! everything done inside it reverts as one step. Aborting a group
//! restores the state recorded for that group only.

use super::Surface;
use crate::error::{LayerError, LayerResult};
use log::trace;

impl Surface {
    pub(super) fn open_group(&mut self) {
        self.group_snapshots.push(self.state.clone());
    }

    pub(super) fn close_group(&mut self) -> LayerResult<()> {
        let snapshot = self.group_snapshots.pop().ok_or(LayerError::NoOpenGroup)?;
        if self.group_snapshots.is_empty() {
            self.undo_stack.push(snapshot);
            trace!("undo group closed, {} steps", self.undo_stack.len());
        }
        Ok(())
    }

    pub(super) fn cancel_group(&mut self) -> LayerResult<()> {
        self.state = self.group_snapshots.pop().ok_or(LayerError::NoOpenGroup)?;
        trace!("undo group aborted, {} still open", self.group_snapshots.len());
        Ok(())
    }

    /// Revert the most recent completed undo group.
    ///
    /// Returns `false` if there is nothing to undo or a group is still
    /// open.
    pub fn undo(&mut self) -> bool {
        if !self.group_snapshots.is_empty() {
            return false;
        }
        match self.undo_stack.pop() {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    /// Number of completed groups that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::types::MergeMode;
    use crate::{LayerError, RasterSubstrate, Surface};
    use alphagrow_core::{Pix, PixelDepth};

    fn two_layers() -> Surface {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        let (mut s, _) = Surface::from_pix(pix.clone(), "a").unwrap();
        s.add_layer("b", pix, 0, 0).unwrap();
        s
    }

    #[test]
    fn test_group_undo_reverts_as_one_step() {
        let mut s = two_layers();
        let before = s.stack().to_vec();
        s.begin_group().unwrap();
        s.begin_group().unwrap();
        s.merge_visible_layers(MergeMode::ExpandAsNecessary).unwrap();
        s.end_group().unwrap();
        s.flatten().unwrap();
        s.end_group().unwrap();

        assert_eq!(s.undo_depth(), 1);
        assert_eq!(s.layer_count(), 1);
        assert!(s.undo());
        assert_eq!(s.stack(), before.as_slice());
        assert!(!s.undo());
    }

    #[test]
    fn test_abort_restores_state() {
        let mut s = two_layers();
        let before = s.stack().to_vec();
        s.begin_group().unwrap();
        s.flatten().unwrap();
        s.abort_group().unwrap();
        assert_eq!(s.stack(), before.as_slice());
        assert_eq!(s.undo_depth(), 0);
    }

    #[test]
    fn test_abort_inner_group_keeps_outer_edits() {
        let mut s = two_layers();
        let before = s.stack().to_vec();
        s.begin_group().unwrap();
        let extra = s
            .add_layer("c", Pix::new(2, 2, PixelDepth::Bit32).unwrap(), 0, 0)
            .unwrap();
        let with_extra = s.stack().to_vec();

        s.begin_group().unwrap();
        s.flatten().unwrap();
        s.abort_group().unwrap();
        assert_eq!(s.stack(), with_extra.as_slice());
        assert!(s.layer(extra).is_ok());

        // The outer group is still open and closes normally.
        s.end_group().unwrap();
        assert_eq!(s.undo_depth(), 1);
        assert!(s.undo());
        assert_eq!(s.stack(), before.as_slice());
    }

    #[test]
    fn test_unbalanced_groups() {
        let mut s = two_layers();
        assert!(matches!(s.end_group(), Err(LayerError::NoOpenGroup)));
        assert!(matches!(s.abort_group(), Err(LayerError::NoOpenGroup)));
        s.begin_group().unwrap();
        assert!(!s.undo());
    }
}
