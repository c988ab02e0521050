#[cfg(test)]
mod tests {
    use crate::cluster::dbscan_test::tests::{offset, to_points, two_groups};
    use crate::cluster::{ClusteredPoints, LocationClusterer, NOISE, Point, meters_to_angular};
    use crate::error::Error;
    use crate::route::{
        RouteOptimizer, RouteSet, assign_order, nearest_neighbor_tour, optimize_routes,
        tour_length,
    };
    use quickcheck::{QuickCheck, TestResult};

    /// Points on one meridian at the given meters north of a base point
    fn meridian(norths: &[f64]) -> Vec<Point> {
        norths
            .iter()
            .enumerate()
            .map(|(i, &n)| offset(i, 40.0, -74.0, n, 0.0))
            .collect()
    }

    fn is_valid_tour(route: &[usize], n: usize) -> bool {
        if route.len() != n + 1 || route.first() != route.last() {
            return false;
        }
        let mut seen = vec![false; n];
        for &i in &route[..n] {
            if i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    #[test]
    fn test_tour_follows_nearest_neighbor() {
        let points = meridian(&[0.0, 300.0, 100.0, 200.0]);
        assert_eq!(nearest_neighbor_tour(&points), vec![0, 2, 3, 1, 0]);
    }

    #[test]
    fn test_tour_breaks_ties_by_lowest_index() {
        // 1 and 2 mirror each other across the equator from the start
        let points = vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 0.001, 0.0),
            Point::new(2, -0.001, 0.0),
        ];
        assert_eq!(nearest_neighbor_tour(&points), vec![0, 1, 2, 0]);

        let points = vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, -0.001, 0.0),
            Point::new(2, 0.001, 0.0),
        ];
        assert_eq!(nearest_neighbor_tour(&points), vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_tour_trivial_sizes() {
        assert!(nearest_neighbor_tour(&[]).is_empty());
        assert_eq!(nearest_neighbor_tour(&meridian(&[0.0])), vec![0, 0]);
    }

    #[test]
    fn test_tour_length() {
        let points = meridian(&[0.0, 100.0]);
        let route = nearest_neighbor_tour(&points);
        assert!((tour_length(&points, &route) - 200.0).abs() < 1e-6);
        assert_eq!(tour_length(&points, &[0, 0]), 0.0);
    }

    #[test]
    fn test_two_groups_routes() {
        let points = two_groups();
        let mut clusterer = LocationClusterer::new(&points);
        clusterer.cluster(meters_to_angular(200.0), 2).unwrap();

        let mut optimizer = RouteOptimizer::from_clusterer(&clusterer).unwrap();
        let routes = optimizer.optimize_routes().clone();
        assert_eq!(routes.len(), 2);
        for route in routes.values() {
            assert!(is_valid_tour(route, 3));
            assert_eq!(route.first(), route.last());
        }

        let routed = optimizer.optimized_points().unwrap();
        assert_eq!(routed.labels(), &[0, 0, 0, 1, 1, 1]);
        for (cluster, route) in &routes {
            let members: Vec<usize> = (0..points.len())
                .filter(|&i| routed.labels()[i] == *cluster as i32)
                .collect();
            for (position, &member) in route[..members.len()].iter().enumerate() {
                assert_eq!(routed.order()[members[member]], Some(position));
            }
        }
    }

    #[test]
    fn test_noise_has_no_order() {
        let mut points = two_groups();
        points.push(offset(6, 40.0, -74.0, 20_000.0, 0.0));
        let mut clusterer = LocationClusterer::new(&points);
        clusterer.cluster(meters_to_angular(200.0), 2).unwrap();

        let routed = RouteOptimizer::from_clusterer(&clusterer)
            .unwrap()
            .optimized_points()
            .unwrap();
        assert_eq!(routed.labels()[6], NOISE);
        assert_eq!(routed.order()[6], None);
        assert!(routed.order()[..6].iter().all(Option::is_some));
        assert_eq!(routed.len(), 7);
    }

    #[test]
    fn test_all_noise_is_a_valid_result() {
        let points = two_groups();
        let clustered = ClusteredPoints::new(points, vec![NOISE; 6]).unwrap();
        let mut optimizer = RouteOptimizer::new(clustered);

        let routed = optimizer.optimized_points().unwrap();
        assert!(optimizer.routes().is_empty());
        assert!(routed.order().iter().all(Option::is_none));
    }

    #[test]
    fn test_optimizer_requires_clustering() {
        let points = two_groups();
        let clusterer = LocationClusterer::new(&points);
        assert!(matches!(
            RouteOptimizer::from_clusterer(&clusterer),
            Err(Error::NotClustered)
        ));
    }

    #[test]
    fn test_assign_order_rejects_mismatched_routes() {
        let clustered = ClusteredPoints::new(two_groups(), vec![0, 0, 0, 1, 1, 1]).unwrap();
        let mut routes = optimize_routes(&clustered);

        let mut missing = routes.clone();
        missing.remove(&1);
        assert!(matches!(
            assign_order(&clustered, &missing),
            Err(Error::InvalidParameter { name: "routes", .. })
        ));

        routes.insert(0, vec![0, 1, 1, 0]);
        assert!(matches!(
            assign_order(&clustered, &routes),
            Err(Error::InvalidParameter { name: "routes", .. })
        ));

        routes.insert(0, vec![0, 1, 0]);
        assert!(matches!(
            assign_order(&clustered, &routes),
            Err(Error::InvalidParameter { name: "routes", .. })
        ));

        routes.insert(0, vec![0, 1, 5, 0]);
        assert!(matches!(
            assign_order(&clustered, &routes),
            Err(Error::InvalidParameter { name: "routes", .. })
        ));
    }

    #[test]
    fn test_assign_order_uses_given_routes() {
        let clustered = ClusteredPoints::new(two_groups(), vec![0, 0, 0, 1, 1, 1]).unwrap();
        let routes = RouteSet::from([(0, vec![2, 0, 1, 2]), (1, vec![0, 1, 2, 0])]);

        let routed = assign_order(&clustered, &routes).unwrap();
        assert_eq!(
            routed.order(),
            &[Some(1), Some(2), Some(0), Some(0), Some(1), Some(2)]
        );
    }

    #[test]
    fn prop_routes_are_valid_tours() {
        fn prop(raw: Vec<(u16, u16)>, min_samples: u8) -> TestResult {
            let points = to_points(&raw);
            let mut clusterer = LocationClusterer::new(&points);
            if clusterer
                .cluster(meters_to_angular(150.0), (min_samples % 3) as usize + 1)
                .is_err()
            {
                return TestResult::error("clustering failed");
            }
            let clustered = clusterer.clustered().expect("clustered");
            let routes = optimize_routes(&clustered);

            let tours_ok = clustered
                .clusters()
                .iter()
                .all(|c| routes.get(&c.c).is_some_and(|r| is_valid_tour(r, c.points.len())));
            let routed = match assign_order(&clustered, &routes) {
                Ok(routed) => routed,
                Err(_) => return TestResult::failed(),
            };
            let noise_ok = routed
                .rows()
                .all(|(_, label, order)| (label == NOISE) == order.is_none());

            TestResult::from_bool(tours_ok && noise_ok && routes == optimize_routes(&clustered))
        }
        QuickCheck::new().quickcheck(prop as fn(Vec<(u16, u16)>, u8) -> TestResult);
    }
}
