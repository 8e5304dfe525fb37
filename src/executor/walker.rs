use super::Visitor;
use crate::{
    data::Graph,
    pattern::EdgeType,
    tree::{DecisionTree, TreeNode, TreeRef},
};

/// Backtracking walk of a decision tree, one starting node at a time.
pub struct TreeWalker<'a, E: EdgeType, G, V> {
    tree: &'a DecisionTree<E>,
    graph: &'a G,
    visitor: V,
    instance: Vec<usize>,
}

impl<'a, E, G, V> TreeWalker<'a, E, G, V>
where
    E: EdgeType,
    G: Graph<E>,
    V: Visitor<E>,
{
    pub fn new(tree: &'a DecisionTree<E>, graph: &'a G, visitor: V) -> Self {
        Self {
            tree,
            graph,
            visitor,
            instance: Vec::with_capacity(tree.order()),
        }
    }

    /// Visits every instance whose node 0 is `start`.
    pub fn run(&mut self, start: usize) {
        self.instance.clear();
        self.instance.push(start);
        self.walk(self.tree.root());
        self.instance.pop();
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn into_visitor(self) -> V {
        self.visitor
    }

    fn walk(&mut self, node: TreeRef) {
        if !self.visitor.enters(node) {
            return;
        }
        let (tree, graph) = (self.tree, self.graph);
        match tree.node(node) {
            TreeNode::AddNode(add_node) => {
                self.visitor.visit(add_node, &self.instance);
                for (&(index, edge), &child) in add_node.children() {
                    for &next in graph.neighbors(self.instance[index], edge) {
                        if self.instance.contains(&next) {
                            continue;
                        }
                        self.instance.push(next);
                        self.walk(child);
                        self.instance.pop();
                    }
                }
            }
            TreeNode::AddEdge(add_edge) => {
                let newest = self.instance[self.instance.len() - 1];
                let next = if graph.has_edge(self.instance[add_edge.node()], newest, add_edge.edge()) {
                    add_edge.present()
                } else {
                    add_edge.absent()
                };
                if let Some(child) = next {
                    self.walk(child);
                }
            }
            TreeNode::Condition(condition) => {
                if self.instance[condition.first()] < self.instance[condition.second()] {
                    self.walk(condition.child());
                }
            }
        }
    }
}
