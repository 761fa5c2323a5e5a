use std::slice;

use medley_definition::StepNode;

/// Lazy depth-first pre-order traversal over a step tree.
///
/// Yields every step exactly once, structural steps included; the
/// consumer inspects a node's own type, the walker does not filter.
/// Decision cases are visited in key order, then the default branch, then
/// fork branches in declared order. `null` entries are skipped. The
/// iterator only borrows the tree, so a traversal is deterministic and
/// can be re-derived at will.
pub fn walk(tasks: &[Option<StepNode>]) -> Walk<'_> {
  Walk {
    stack: vec![tasks.iter()],
  }
}

pub struct Walk<'a> {
  stack: Vec<slice::Iter<'a, Option<StepNode>>>,
}

impl<'a> Iterator for Walk<'a> {
  type Item = &'a StepNode;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let frame = self.stack.last_mut()?;
      match frame.next() {
        None => {
          self.stack.pop();
        }
        Some(None) => {}
        Some(Some(step)) => {
          // Push child branches in reverse so the first branch sits on
          // top of the stack and is visited next.
          for branch in step.child_branches().into_iter().rev() {
            self.stack.push(branch.iter());
          }
          return Some(step);
        }
      }
    }
  }
}
