// ava-core/src/domain/graph/dag.rs

use crate::domain::error::DomainError;
use crate::domain::workflow::ParsedJob;
use std::collections::HashMap;

/// Job dependency graph over arena indices (declaration order).
/// `needs` entries pointing at unknown jobs are left out of the edges;
/// `missing_dependencies` reports them.
pub struct JobGraph<'a> {
    ids: Vec<&'a str>,
    /// deps[i] = indices of the jobs that job i needs.
    deps: Vec<Vec<usize>>,
    missing: Vec<(&'a str, &'a str)>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

impl<'a> JobGraph<'a> {
    pub fn new(jobs: &'a [ParsedJob]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(jobs.len());
        let mut ids = Vec::with_capacity(jobs.len());
        for job in jobs {
            if !index.contains_key(job.id.as_str()) {
                index.insert(job.id.as_str(), ids.len());
                ids.push(job.id.as_str());
            }
        }

        let mut deps = vec![Vec::new(); ids.len()];
        let mut missing = Vec::new();
        for job in jobs {
            let Some(&from) = index.get(job.id.as_str()) else {
                continue;
            };
            for need in &job.needs {
                match index.get(need.as_str()) {
                    Some(&to) => deps[from].push(to),
                    None => missing.push((job.id.as_str(), need.as_str())),
                }
            }
        }

        Self { ids, deps, missing }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `(job, dependency)` pairs whose dependency does not exist.
    pub fn missing_dependencies(&self) -> &[(&'a str, &'a str)] {
        &self.missing
    }

    /// First dependency cycle found by a white/gray/black DFS started from
    /// every unvisited job in declaration order. The path starts at the job
    /// that closes the loop and repeats it at the end: `[a, b, c, a]`.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut marks = vec![Mark::White; self.len()];

        for root in 0..self.len() {
            if marks[root] == Mark::White {
                if let Some(cycle) = self.visit(root, &mut marks) {
                    return Some(cycle);
                }
            }
        }
        None
    }

    /// Iterative DFS: the explicit stack is the current path, each frame
    /// holding the index of the next dependency to follow.
    fn visit(&self, root: usize, marks: &mut [Mark]) -> Option<Vec<String>> {
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        marks[root] = Mark::Gray;

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let Some(&dep) = self.deps[node].get(next) else {
                marks[node] = Mark::Black;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[dep] {
                Mark::Gray => {
                    let start = stack.iter().position(|&(n, _)| n == dep).unwrap_or(0);
                    let mut cycle: Vec<String> = stack[start..]
                        .iter()
                        .map(|&(i, _)| self.ids[i].to_string())
                        .collect();
                    cycle.push(self.ids[dep].to_string());
                    return Some(cycle);
                }
                Mark::White => {
                    marks[dep] = Mark::Gray;
                    stack.push((dep, 0));
                }
                Mark::Black => {}
            }
        }
        None
    }

    /// Topological sort with layers: every job of layer N only needs jobs of
    /// layers 0..N-1, so a layer can run in parallel. Jobs inside a layer keep
    /// declaration order.
    pub fn execution_layers(&self) -> Result<Vec<Vec<String>>, DomainError> {
        let n = self.len();
        let mut in_degree: Vec<usize> = self.deps.iter().map(Vec::len).collect();
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (job, deps) in self.deps.iter().enumerate() {
            for &dep in deps {
                dependents[dep].push(job);
            }
        }

        let mut layers = Vec::new();
        let mut current: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut total_resolved = 0;

        while !current.is_empty() {
            total_resolved += current.len();
            let mut next = Vec::new();
            for &job in &current {
                for &dependent in &dependents[job] {
                    in_degree[dependent] -= 1;
                    if in_degree[dependent] == 0 {
                        next.push(dependent);
                    }
                }
            }
            next.sort_unstable();
            layers.push(current.iter().map(|&i| self.ids[i].to_string()).collect());
            current = next;
        }

        if total_resolved != n {
            let involved = self
                .find_cycle()
                .map(|c| c.join(" -> "))
                .unwrap_or_else(|| format!("Resolved {}/{} jobs", total_resolved, n));
            return Err(DomainError::CircularDependency(involved));
        }

        Ok(layers)
    }
}
