// ABOUTME: Flat indexed view of a template and its transition graph
// ABOUTME: Maps step ids to steps, option answers to targets, and answers reachability queries

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef, Reversed};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

use crate::parser::{Template, TemplateStep};

/// How one step leads to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Chosen option `value` of `field_id` names the target step.
    Option { field_id: String, value: String },
    /// No option applied; the next step in sequence follows.
    Sequential,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TransitionKey {
    step_id: String,
    field_id: String,
    value: String,
}

#[derive(Debug, Clone)]
pub struct StepGraph {
    template: Template,
    step_indices: IndexMap<String, usize>,
    transitions: HashMap<TransitionKey, String>,
    graph: DiGraph<String, Transition>,
    node_indices: HashMap<String, NodeIndex>,
}

impl StepGraph {
    /// Index a template. Duplicate step ids keep their first occurrence and
    /// option targets that name no step stay out of the graph; both are
    /// reported by the validator rather than rejected here.
    pub fn from_template(template: Template) -> Self {
        let mut step_indices = IndexMap::new();
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for (position, step) in template.steps.iter().enumerate() {
            if !step_indices.contains_key(&step.step_id) {
                step_indices.insert(step.step_id.clone(), position);
                let node = graph.add_node(step.step_id.clone());
                node_indices.insert(step.step_id.clone(), node);
            }
        }

        let mut transitions = HashMap::new();
        for (step_id, &position) in &step_indices {
            let step = &template.steps[position];
            let from = node_indices[step_id];

            // a last step ends the session whatever its options say
            if step.is_last_step {
                continue;
            }

            for field in step.option_fields() {
                for option in &field.options {
                    let Some(target) = option.target_step() else {
                        continue;
                    };

                    let key = TransitionKey {
                        step_id: step_id.clone(),
                        field_id: field.field_id.clone(),
                        value: option.value.clone(),
                    };
                    transitions
                        .entry(key)
                        .or_insert_with(|| target.to_string());

                    if let Some(&to) = node_indices.get(target) {
                        graph.add_edge(
                            from,
                            to,
                            Transition::Option {
                                field_id: field.field_id.clone(),
                                value: option.value.clone(),
                            },
                        );
                    }
                }
            }

            if !Self::can_fall_through(step) {
                continue;
            }
            if let Some(next) = template.steps.get(position + 1) {
                if let Some(&to) = node_indices.get(&next.step_id) {
                    graph.add_edge(from, to, Transition::Sequential);
                }
            }
        }

        Self {
            template,
            step_indices,
            transitions,
            graph,
            node_indices,
        }
    }

    /// True unless some required option field routes every one of its options
    /// explicitly, in which case an answered step always branches.
    pub fn can_fall_through(step: &TemplateStep) -> bool {
        !step.option_fields().any(|field| {
            field.required
                && field
                    .options
                    .iter()
                    .all(|option| option.target_step().is_some())
        })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn steps(&self) -> &[TemplateStep] {
        &self.template.steps
    }

    pub fn entry_step_id(&self) -> Option<&str> {
        self.template.entry_step_id()
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.step_indices.contains_key(step_id)
    }

    pub fn step(&self, step_id: &str) -> Option<&TemplateStep> {
        self.position(step_id)
            .map(|position| &self.template.steps[position])
    }

    /// Position of the step in the template's sequence
    pub fn position(&self, step_id: &str) -> Option<usize> {
        self.step_indices.get(step_id).copied()
    }

    /// The step immediately following `step_id` in sequence
    pub fn step_after(&self, step_id: &str) -> Option<&TemplateStep> {
        self.position(step_id)
            .and_then(|position| self.template.steps.get(position + 1))
    }

    /// Target step id declared for answering `value` to `field_id` on `step_id`
    pub fn transition(&self, step_id: &str, field_id: &str, value: &str) -> Option<&str> {
        let key = TransitionKey {
            step_id: step_id.to_string(),
            field_id: field_id.to_string(),
            value: value.to_string(),
        };
        self.transitions.get(&key).map(String::as_str)
    }

    /// Outgoing transitions of a step, in declaration order
    pub fn successors(&self, step_id: &str) -> Vec<(String, Transition)> {
        let Some(&node) = self.node_indices.get(step_id) else {
            return Vec::new();
        };

        let mut edges: Vec<_> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| {
                (
                    edge.id(),
                    self.graph[edge.target()].clone(),
                    edge.weight().clone(),
                )
            })
            .collect();
        // petgraph walks edges newest first
        edges.sort_by_key(|(id, _, _)| *id);
        edges
            .into_iter()
            .map(|(_, target, transition)| (target, transition))
            .collect()
    }

    /// Steps with a transition into `step_id`
    pub fn predecessors(&self, step_id: &str) -> Vec<String> {
        let Some(&node) = self.node_indices.get(step_id) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .filter(|neighbor| seen.insert(*neighbor))
            .map(|neighbor| self.graph[neighbor].clone())
            .collect()
    }

    /// Every step some sequence of answers can reach from `step_id`, itself included
    pub fn reachable_from(&self, step_id: &str) -> HashSet<String> {
        let mut reachable = HashSet::new();
        let Some(&start) = self.node_indices.get(step_id) else {
            return reachable;
        };

        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(node) = bfs.next(&self.graph) {
            reachable.insert(self.graph[node].clone());
        }
        reachable
    }

    pub fn has_path(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&from), Some(&to)) => {
                petgraph::algo::has_path_connecting(&self.graph, from, to, None)
            }
            _ => false,
        }
    }

    /// Steps from which no step marked as last can be reached, in sequence order
    pub fn steps_without_exit(&self) -> Vec<String> {
        let reversed = Reversed(&self.graph);
        let mut can_finish = HashSet::new();

        for step_id in self.template.terminal_step_ids() {
            if let Some(&node) = self.node_indices.get(&step_id) {
                let mut bfs = Bfs::new(reversed, node);
                while let Some(found) = bfs.next(reversed) {
                    can_finish.insert(found);
                }
            }
        }

        self.step_indices
            .keys()
            .filter(|step_id| !can_finish.contains(&self.node_indices[*step_id]))
            .cloned()
            .collect()
    }
}
