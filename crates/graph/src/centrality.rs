//! Node centrality over the undirected team graph.
//!
//! Implements degree, betweenness, closeness and eigenvector centrality on
//! unweighted adjacency lists. Normalization follows the usual
//! conventions: betweenness is scaled by `1/((n-1)(n-2))`, closeness uses the
//! Wasserman-Faust correction for disconnected graphs, and eigenvector
//! centrality is the L2-normalized power iteration on `A + I`.

use crate::types::TeamGraph;
use std::collections::VecDeque;
use teamnet_protocol::CentralityRow;

/// Eigenvector iteration settings
#[derive(Debug, Clone, Copy)]
pub struct EigenvectorConfig {
    pub max_iter: usize,
    /// Per-node tolerance; convergence when the L1 change is below `n * tolerance`
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-6,
        }
    }
}

/// All four measures for every node, in table order
pub fn centrality(graph: &TeamGraph, config: EigenvectorConfig) -> Vec<CentralityRow> {
    let adj = graph.adjacency();
    let degree = degree_centrality(&adj);
    let betweenness = betweenness_centrality(&adj);
    let closeness = closeness_centrality(&adj);
    let eigenvector = eigenvector_centrality(&adj, config);

    if eigenvector.is_none() && !adj.is_empty() {
        log::warn!(
            "Eigenvector centrality did not converge in {} iterations",
            config.max_iter
        );
    }

    graph
        .nodes()
        .map(|(idx, node)| {
            let i = idx.index();
            CentralityRow {
                handle: node.handle().to_string(),
                name: node.person.name().to_string(),
                department: node.person.department().map(str::to_string),
                degree: degree[i],
                betweenness: betweenness[i],
                closeness: closeness[i],
                eigenvector: eigenvector.as_ref().map(|v| v[i]),
            }
        })
        .collect()
}

pub fn degree_centrality(adj: &[Vec<usize>]) -> Vec<f64> {
    let n = adj.len();
    if n <= 1 {
        return vec![1.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    adj.iter().map(|nbrs| nbrs.len() as f64 * scale).collect()
}

/// Brandes' algorithm for unweighted graphs
pub fn betweenness_centrality(adj: &[Vec<usize>]) -> Vec<f64> {
    let n = adj.len();
    let mut bc = vec![0.0; n];

    for s in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist: Vec<Option<usize>> = vec![None; n];
        sigma[s] = 1.0;
        dist[s] = Some(0);

        let mut queue = VecDeque::from([s]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let dv = dist[v].unwrap_or(0);
            for &w in &adj[v] {
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                bc[w] += delta[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for value in &mut bc {
            *value *= scale;
        }
    }
    bc
}

/// Closeness with the Wasserman-Faust correction
pub fn closeness_centrality(adj: &[Vec<usize>]) -> Vec<f64> {
    let n = adj.len();
    (0..n)
        .map(|u| {
            let dist = bfs_distances(adj, u);
            let reachable = dist.iter().filter(|d| d.is_some()).count();
            let total: usize = dist.iter().flatten().sum();
            if total == 0 || n <= 1 {
                return 0.0;
            }
            let r = (reachable - 1) as f64;
            (r / total as f64) * (r / (n - 1) as f64)
        })
        .collect()
}

fn bfs_distances(adj: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut dist = vec![None; adj.len()];
    dist[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        let next = dist[v].map_or(0, |d| d + 1);
        for &w in &adj[v] {
            if dist[w].is_none() {
                dist[w] = Some(next);
                queue.push_back(w);
            }
        }
    }
    dist
}

/// Power iteration on `A + I`; `None` when it does not converge
pub fn eigenvector_centrality(adj: &[Vec<usize>], config: EigenvectorConfig) -> Option<Vec<f64>> {
    let n = adj.len();
    if n == 0 {
        return Some(Vec::new());
    }

    let mut x = vec![1.0 / n as f64; n];
    for _ in 0..config.max_iter {
        let last = x.clone();
        for (v, nbrs) in adj.iter().enumerate() {
            for &w in nbrs {
                x[w] += last[v];
            }
        }

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        for value in &mut x {
            *value /= norm;
        }

        let change: f64 = x.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        if change < n as f64 * config.tolerance {
            return Some(x);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> Vec<Vec<usize>> {
        (0..n)
            .map(|i| {
                let mut nbrs = Vec::new();
                if i > 0 {
                    nbrs.push(i - 1);
                }
                if i + 1 < n {
                    nbrs.push(i + 1);
                }
                nbrs
            })
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn degree_on_a_path() {
        let d = degree_centrality(&path(3));
        assert!(close(d[0], 0.5) && close(d[1], 1.0) && close(d[2], 0.5));
        assert_eq!(degree_centrality(&[vec![]]), vec![1.0]);
    }

    #[test]
    fn betweenness_on_a_path() {
        // 0 - 1 - 2 - 3
        let b = betweenness_centrality(&path(4));
        assert!(close(b[0], 0.0));
        assert!(close(b[1], 2.0 / 3.0));
        assert!(close(b[2], 2.0 / 3.0));
        assert!(close(b[3], 0.0));
    }

    #[test]
    fn betweenness_of_a_star_centre() {
        let adj = vec![vec![1, 2, 3], vec![0], vec![0], vec![0]];
        let b = betweenness_centrality(&adj);
        assert!(close(b[0], 1.0));
        assert!(close(b[1], 0.0));
    }

    #[test]
    fn closeness_handles_disconnected_parts() {
        // 0 - 1   2 (isolated)
        let adj = vec![vec![1], vec![0], vec![]];
        let c = closeness_centrality(&adj);
        assert!(close(c[0], 0.5));
        assert!(close(c[1], 0.5));
        assert!(close(c[2], 0.0));

        let c = closeness_centrality(&path(3));
        assert!(close(c[1], 1.0));
        assert!(close(c[0], 2.0 / 3.0));
    }

    #[test]
    fn eigenvector_is_symmetric_on_a_path() {
        let e = eigenvector_centrality(&path(3), EigenvectorConfig::default()).unwrap();
        assert!(close(e[0], e[2]));
        assert!(e[1] > e[0]);
        let norm: f64 = e.iter().map(|v| v * v).sum::<f64>();
        assert!(close(norm, 1.0));
    }

    #[test]
    fn eigenvector_reports_non_convergence() {
        let config = EigenvectorConfig {
            max_iter: 1,
            tolerance: 1e-12,
        };
        assert!(eigenvector_centrality(&path(4), config).is_none());
    }

    #[test]
    fn isolated_nodes_converge_to_uniform() {
        let adj = vec![vec![], vec![], vec![], vec![]];
        let e = eigenvector_centrality(&adj, EigenvectorConfig::default()).unwrap();
        assert!(e.iter().all(|v| close(*v, 0.5)));
    }
}
