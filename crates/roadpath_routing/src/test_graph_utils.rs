#[cfg(test)]
pub mod test_graph {
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    use crate::{
        point::Point,
        road_graph::RoadGraph,
        types::{NodeId, Weight},
    };

    pub fn id(value: u64) -> NodeId {
        NodeId::new(value)
    }

    pub fn points(ids: &[(u64, f64, f64)]) -> Vec<(NodeId, Point)> {
        ids.iter()
            .map(|&(node, x, y)| (id(node), Point::new(x, y)))
            .collect()
    }

    pub fn arcs(edges: &[(u64, u64, Weight)]) -> Vec<(NodeId, NodeId, Weight)> {
        edges
            .iter()
            .map(|&(from, to, weight)| (id(from), id(to), weight))
            .collect()
    }

    /// 1 -> 2 -> 3 on the x axis, unit weights.
    pub fn line_graph() -> RoadGraph {
        line_graph_with(&[])
    }

    pub fn line_graph_with(extra: &[(u64, u64, Weight)]) -> RoadGraph {
        let mut edges = vec![(1, 2, 1.0), (2, 3, 1.0)];
        edges.extend_from_slice(extra);

        RoadGraph::new(
            points(&[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0)]),
            arcs(&edges),
        )
        .unwrap()
    }

    /// Two equally short routes from 1 to 4, through 2 and through 3.
    /// `via_two_first` controls which branch is inserted first.
    pub fn diamond_graph(via_two_first: bool) -> RoadGraph {
        let edges = if via_two_first {
            vec![(1, 2, 1.0), (1, 3, 1.0), (2, 4, 1.0), (3, 4, 1.0)]
        } else {
            vec![(1, 3, 1.0), (1, 2, 1.0), (3, 4, 1.0), (2, 4, 1.0)]
        };

        RoadGraph::new(
            points(&[(1, 0.0, 0.0), (2, 1.0, 1.0), (3, 1.0, -1.0), (4, 2.0, 0.0)]),
            arcs(&edges),
        )
        .unwrap()
    }

    /// `width * height` grid with unit edges in both directions, ids are `y * width + x + 1`.
    pub fn grid_graph(width: u64, height: u64) -> RoadGraph {
        let node_id = |x: u64, y: u64| y * width + x + 1;

        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for y in 0..height {
            for x in 0..width {
                nodes.push((node_id(x, y), x as f64, y as f64));
                if x + 1 < width {
                    edges.push((node_id(x, y), node_id(x + 1, y), 1.0));
                    edges.push((node_id(x + 1, y), node_id(x, y), 1.0));
                }
                if y + 1 < height {
                    edges.push((node_id(x, y), node_id(x, y + 1), 1.0));
                    edges.push((node_id(x, y + 1), node_id(x, y), 1.0));
                }
            }
        }

        RoadGraph::new(points(&nodes), arcs(&edges)).unwrap()
    }

    /// Random directed graph with integral weights, so sums are exact.
    pub fn random_graph(seed: u64, nodes: u64, edges: usize) -> RoadGraph {
        let mut rng = SmallRng::seed_from_u64(seed);

        let node_points: Vec<(u64, f64, f64)> = (1..=nodes)
            .map(|node| {
                (
                    node,
                    rng.random_range(0.0..100.0),
                    rng.random_range(0.0..100.0),
                )
            })
            .collect();

        let edge_list: Vec<(u64, u64, Weight)> = (0..edges)
            .map(|_| {
                (
                    rng.random_range(1..=nodes),
                    rng.random_range(1..=nodes),
                    rng.random_range(0..10) as Weight,
                )
            })
            .collect();

        RoadGraph::new(points(&node_points), arcs(&edge_list)).unwrap()
    }

    #[derive(Clone, Copy)]
    pub enum RomaniaGraphCity {
        Arad = 1,
        Bucharest = 2,
        Craiova = 3,
        Dobreta = 4,
        Eforie = 5,
        Fagaras = 6,
        Giurgiu = 7,
        Hirsova = 8,
        Iasi = 9,
        Lugoj = 10,
        Mehadia = 11,
        Neamt = 12,
        Oradea = 13,
        Pitesti = 14,
        RimnicuVilcea = 15,
        Sibiu = 16,
        Timisoara = 17,
        Urziceni = 18,
        Vaslui = 19,
        Zerind = 20,
    }

    impl From<RomaniaGraphCity> for NodeId {
        fn from(value: RomaniaGraphCity) -> Self {
            NodeId::new(value as u64)
        }
    }

    fn get_romania_graph_cities() -> Vec<(RomaniaGraphCity, f64, f64)> {
        use RomaniaGraphCity::*;

        vec![
            (Arad, 21.31, 46.18),
            (Bucharest, 26.10, 44.43),
            (Craiova, 23.80, 44.32),
            (Dobreta, 22.66, 44.63),
            (Eforie, 28.65, 44.06),
            (Fagaras, 24.97, 45.84),
            (Giurgiu, 25.97, 43.90),
            (Hirsova, 27.95, 44.69),
            (Iasi, 27.60, 47.16),
            (Lugoj, 21.90, 45.69),
            (Mehadia, 22.36, 44.90),
            (Neamt, 26.37, 46.93),
            (Oradea, 21.92, 47.05),
            (Pitesti, 24.87, 44.86),
            (RimnicuVilcea, 24.37, 45.10),
            (Sibiu, 24.15, 45.79),
            (Timisoara, 21.23, 45.75),
            (Urziceni, 26.64, 44.72),
            (Vaslui, 27.73, 46.64),
            (Zerind, 21.52, 46.62),
        ]
    }

    // https://user-images.githubusercontent.com/43790152/97784960-1a142580-1bc4-11eb-9070-39c03eb16df2.png
    fn get_romania_graph_roads() -> Vec<(RomaniaGraphCity, RomaniaGraphCity, Weight)> {
        use RomaniaGraphCity::*;

        vec![
            (Oradea, Zerind, 71.0),
            (Oradea, Sibiu, 151.0),
            (Zerind, Arad, 75.0),
            (Arad, Sibiu, 140.0),
            (Arad, Timisoara, 118.0),
            (Timisoara, Lugoj, 111.0),
            (Lugoj, Mehadia, 70.0),
            (Mehadia, Dobreta, 75.0),
            (Dobreta, Craiova, 120.0),
            (Craiova, RimnicuVilcea, 146.0),
            (Craiova, Pitesti, 138.0),
            (RimnicuVilcea, Pitesti, 97.0),
            (RimnicuVilcea, Sibiu, 80.0),
            (Sibiu, Fagaras, 99.0),
            (Fagaras, Bucharest, 211.0),
            (Pitesti, Bucharest, 101.0),
            (Bucharest, Giurgiu, 90.0),
            (Bucharest, Urziceni, 85.0),
            (Urziceni, Hirsova, 98.0),
            (Hirsova, Eforie, 86.0),
            (Urziceni, Vaslui, 142.0),
            (Vaslui, Iasi, 92.0),
            (Iasi, Neamt, 87.0),
        ]
    }

    /// Romanian road map, every road usable in both directions.
    pub fn romania_graph() -> RoadGraph {
        let nodes = get_romania_graph_cities()
            .into_iter()
            .map(|(city, x, y)| (NodeId::from(city), Point::new(x, y)));

        let edges = get_romania_graph_roads()
            .into_iter()
            .flat_map(|(a, b, distance)| {
                let (a, b) = (NodeId::from(a), NodeId::from(b));
                [(a, b, distance), (b, a, distance)]
            });

        RoadGraph::new(nodes, edges).unwrap()
    }
}
