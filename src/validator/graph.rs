use crate::form::{Section, next_in_order};
use crate::logic::{NavigationSpec, NavigationTarget};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::VecDeque;

/// The directed graph of possible section-to-section moves of one form.
///
/// Every section has an edge to each destination its spec can produce: one per
/// distinct rule target plus the default. `NEXT` becomes an edge to the
/// following section (none after the last one) and `SUBMIT` adds no edge.
/// Targets that name no known section and edges from a section to itself are
/// left out; both are reported by the structural checks instead.
#[derive(Debug, Clone)]
pub struct NavigationGraph {
    /// Section ids sorted by order.
    nodes: Vec<String>,
    edges: AHashMap<String, Vec<String>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl NavigationGraph {
    /// Builds the graph from scratch. `spec_for` returns the spec in effect for
    /// a section; sections without one navigate linearly.
    pub fn build<'s, F>(sections: &[Section], spec_for: F) -> Self
    where
        F: Fn(&str) -> Option<&'s NavigationSpec>,
    {
        let known: AHashSet<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        let default_spec = NavigationSpec::default();

        let nodes: Vec<String> = sections
            .iter()
            .sorted_by_key(|s| s.order)
            .map(|s| s.id.clone())
            .collect();

        let mut edges = AHashMap::new();
        for section in sections {
            let spec = spec_for(&section.id).unwrap_or(&default_spec);
            let successors: Vec<String> = spec
                .targets()
                .filter_map(|target| match target {
                    NavigationTarget::Next => {
                        next_in_order(sections, section.order).map(|s| s.id.as_str())
                    }
                    NavigationTarget::Submit => None,
                    NavigationTarget::Section(id) => Some(id.as_str()),
                })
                .filter(|id| known.contains(id) && *id != section.id)
                .unique()
                .map(str::to_string)
                .collect();
            edges.insert(section.id.clone(), successors);
        }

        tracing::debug!(
            sections = nodes.len(),
            edges = edges.values().map(Vec::len).sum::<usize>(),
            "navigation graph built"
        );
        Self { nodes, edges }
    }

    pub fn successors(&self, section_id: &str) -> &[String] {
        self.edges.get(section_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds the cycles of the graph with a depth-first search from every
    /// section, in section order.
    ///
    /// Each cycle is returned as the sections on it, starting with the section
    /// the search re-entered. Any path counts, since a respondent's answers are
    /// not known in advance.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut marks: AHashMap<&str, Mark> = self
            .nodes
            .iter()
            .map(|id| (id.as_str(), Mark::Unvisited))
            .collect();
        let mut stack = Vec::new();
        let mut cycles = Vec::new();

        for start in &self.nodes {
            if marks.get(start.as_str()) == Some(&Mark::Unvisited) {
                self.visit(start, &mut marks, &mut stack, &mut cycles);
            }
        }

        for cycle in &cycles {
            tracing::debug!(cycle = %cycle.join(" -> "), "cycle detected");
        }
        cycles
    }

    fn visit<'g>(
        &'g self,
        node: &'g str,
        marks: &mut AHashMap<&'g str, Mark>,
        stack: &mut Vec<&'g str>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        marks.insert(node, Mark::OnStack);
        stack.push(node);

        for next in self.successors(node) {
            match marks.get(next.as_str()).copied().unwrap_or(Mark::Done) {
                Mark::Unvisited => self.visit(next, marks, stack, cycles),
                Mark::OnStack => {
                    if let Some(pos) = stack.iter().position(|id| *id == next.as_str()) {
                        cycles.push(stack[pos..].iter().map(|id| id.to_string()).collect());
                    }
                }
                Mark::Done => {}
            }
        }

        stack.pop();
        marks.insert(node, Mark::Done);
    }

    /// Sections that no path from the first section (lowest order) reaches.
    pub fn unreachable_from_start(&self) -> Vec<String> {
        let Some(start) = self.nodes.first() else {
            return Vec::new();
        };

        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut queue = VecDeque::from([start.as_str()]);
        seen.insert(start.as_str());
        while let Some(node) = queue.pop_front() {
            for next in self.successors(node) {
                if seen.insert(next.as_str()) {
                    queue.push_back(next.as_str());
                }
            }
        }

        self.nodes
            .iter()
            .filter(|id| !seen.contains(id.as_str()))
            .cloned()
            .collect()
    }
}
