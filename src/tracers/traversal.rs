// Binary tree traversal tracer (pre-, in-, post-order)

use crate::errors::TraceError;
use crate::snapshot::{
    ActionTag, State, Trace, TraceRecorder, TraversalOrder, TraversalState, TreeNode,
};
use crate::tracers::Family;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeParams {
    /// Level-order layout; `None` marks a missing child
    pub level_order: Vec<Option<i64>>,
}

/// Progress of one node on the traversal stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Not yet looked at
    Enter,
    /// Left subtree finished
    LeftDone,
    /// Both subtrees finished
    RightDone,
}

/// Build the node arena from a level-order layout; the root lands at index 0
pub fn build_tree(level_order: &[Option<i64>]) -> Option<Vec<TreeNode>> {
    let root = (*level_order.first()?)?;
    let mut nodes = vec![TreeNode {
        value: root,
        left: None,
        right: None,
    }];
    let mut queue = VecDeque::from([0usize]);
    let mut slots = level_order[1..].iter();

    while let Some(parent) = queue.pop_front() {
        for is_left in [true, false] {
            let Some(slot) = slots.next() else {
                return Some(nodes);
            };
            if let Some(value) = *slot {
                let id = nodes.len();
                nodes.push(TreeNode {
                    value,
                    left: None,
                    right: None,
                });
                if is_left {
                    nodes[parent].left = Some(id);
                } else {
                    nodes[parent].right = Some(id);
                }
                queue.push_back(id);
            }
        }
    }

    Some(nodes)
}

struct Run {
    order: TraversalOrder,
    nodes: Vec<TreeNode>,
    frames: Vec<(usize, Stage)>,
    current: Option<usize>,
    output: Vec<i64>,
}

impl Run {
    fn state(&self) -> State {
        State::Traversal(TraversalState {
            order: self.order,
            nodes: self.nodes.clone(),
            current: self.current,
            stack: self.frames.iter().map(|&(node, _)| node).collect(),
            output: self.output.clone(),
        })
    }

    fn visit(&mut self, rec: &mut TraceRecorder, node: usize) -> Result<(), TraceError> {
        let value = self.nodes[node].value;
        self.output.push(value);
        rec.counters_mut().selected += 1;
        rec.push(ActionTag::Visit, format!("Process {}", value), self.state())
    }

    fn set_stage(&mut self, stage: Stage) {
        if let Some(top) = self.frames.last_mut() {
            top.1 = stage;
        }
    }
}

/// Trace a depth-first traversal using an explicit stack.
///
/// The order only changes where the visit step falls: before the left
/// descent (pre), between the descents (in), or after both (post).
pub fn trace(params: &TreeParams, order: TraversalOrder) -> Result<Trace, TraceError> {
    let family = match order {
        TraversalOrder::PreOrder => Family::PreorderTraversal,
        TraversalOrder::InOrder => Family::InorderTraversal,
        TraversalOrder::PostOrder => Family::PostorderTraversal,
    };
    let nodes = build_tree(&params.level_order)
        .ok_or_else(|| TraceError::contract(family, "tree has no root"))?;

    let mut rec = TraceRecorder::new(family);
    let mut run = Run {
        order,
        nodes,
        frames: vec![(0, Stage::Enter)],
        current: Some(0),
        output: Vec::new(),
    };
    let size = run.nodes.len();
    rec.push(
        ActionTag::Initialize,
        format!("Start at the root of a {}-node tree", size),
        run.state(),
    )?;

    while let Some(&(node, stage)) = run.frames.last() {
        run.current = Some(node);
        let TreeNode { left, right, .. } = run.nodes[node];

        match stage {
            Stage::Enter => {
                if order == TraversalOrder::PreOrder {
                    run.visit(&mut rec, node)?;
                }
                run.set_stage(Stage::LeftDone);
                if let Some(child) = left {
                    run.frames.push((child, Stage::Enter));
                    run.current = Some(child);
                    let description = format!(
                        "Descend left from {} to {}",
                        run.nodes[node].value, run.nodes[child].value
                    );
                    rec.push(ActionTag::DescendLeft, description, run.state())?;
                }
            }
            Stage::LeftDone => {
                if order == TraversalOrder::InOrder {
                    run.visit(&mut rec, node)?;
                }
                run.set_stage(Stage::RightDone);
                if let Some(child) = right {
                    run.frames.push((child, Stage::Enter));
                    run.current = Some(child);
                    let description = format!(
                        "Descend right from {} to {}",
                        run.nodes[node].value, run.nodes[child].value
                    );
                    rec.push(ActionTag::DescendRight, description, run.state())?;
                }
            }
            Stage::RightDone => {
                if order == TraversalOrder::PostOrder {
                    run.visit(&mut rec, node)?;
                }
                run.frames.pop();
            }
        }
    }

    run.current = None;
    let visited = run
        .output
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    rec.push(
        ActionTag::Complete,
        format!("Visit order: {}", visited),
        run.state(),
    )?;
    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    //        1
    //      /   \
    //     2     3
    //    / \     \
    //   4   5     6
    fn sample() -> TreeParams {
        TreeParams {
            level_order: vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(6)],
        }
    }

    fn output(order: TraversalOrder) -> Vec<i64> {
        let trace = trace(&sample(), order).unwrap();
        match &trace.last().state {
            State::Traversal(s) => s.output.clone(),
            other => panic!("Expected traversal state, got {:?}", other),
        }
    }

    #[test]
    fn test_build_tree_skips_holes() {
        let nodes = build_tree(&sample().level_order).unwrap();
        assert_eq!(nodes.len(), 6);
        assert_eq!(nodes[2].left, None);
        assert_eq!(nodes[nodes[2].right.unwrap()].value, 6);
    }

    #[test]
    fn test_build_tree_requires_root() {
        assert!(build_tree(&[]).is_none());
        assert!(build_tree(&[None, Some(1)]).is_none());
    }

    #[test]
    fn test_preorder() {
        assert_eq!(output(TraversalOrder::PreOrder), vec![1, 2, 4, 5, 3, 6]);
    }

    #[test]
    fn test_inorder() {
        assert_eq!(output(TraversalOrder::InOrder), vec![4, 2, 5, 1, 3, 6]);
    }

    #[test]
    fn test_postorder() {
        assert_eq!(output(TraversalOrder::PostOrder), vec![4, 5, 2, 6, 3, 1]);
    }

    #[test]
    fn test_visit_placement_for_single_parent() {
        let params = TreeParams {
            level_order: vec![Some(1), Some(2), Some(3)],
        };
        use ActionTag::*;
        let tags = |order| trace(&params, order).unwrap().actions();
        assert_eq!(
            tags(TraversalOrder::PreOrder),
            vec![Initialize, Visit, DescendLeft, Visit, DescendRight, Visit, Complete]
        );
        assert_eq!(
            tags(TraversalOrder::InOrder),
            vec![Initialize, DescendLeft, Visit, Visit, DescendRight, Visit, Complete]
        );
        assert_eq!(
            tags(TraversalOrder::PostOrder),
            vec![Initialize, DescendLeft, Visit, DescendRight, Visit, Visit, Complete]
        );
    }
}
