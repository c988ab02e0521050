#[cfg(test)]
mod tests {
    use crate::cluster::dbscan_test::tests::two_groups;
    use crate::cluster::{LocationClusterer, NOISE, Point, meters_to_angular};
    use crate::error::Error;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_evaluate_before_cluster_fails() {
        let points = two_groups();
        let clusterer = LocationClusterer::new(&points);

        assert!(!clusterer.is_clustered());
        assert_eq!(clusterer.labels(), None);
        assert_eq!(clusterer.evaluate(), Err(Error::NotClustered));
        assert_eq!(clusterer.clustered(), Err(Error::NotClustered));
    }

    #[test]
    fn test_cluster_then_evaluate() {
        let points = two_groups();
        let mut clusterer = LocationClusterer::new(&points);

        let labels = clusterer.cluster(meters_to_angular(200.0), 2).unwrap();
        assert_eq!(labels, &[0, 0, 0, 1, 1, 1]);

        let scores = clusterer.evaluate().unwrap();
        assert!(scores.silhouette > 0.9);

        let clustered = clusterer.clustered().unwrap();
        assert_eq!(clustered.points(), points.as_slice());
        assert_eq!(clustered.n_clusters(), 2);
        assert!(clustered.noise().is_empty());
    }

    #[test]
    fn test_recluster_overwrites_labels() {
        let points = two_groups();
        let mut clusterer = LocationClusterer::new(&points);

        clusterer.cluster(meters_to_angular(200.0), 2).unwrap();
        clusterer.cluster(meters_to_angular(10.0), 2).unwrap();
        assert_eq!(clusterer.labels(), Some(&[NOISE; 6][..]));
        assert_eq!(
            clusterer.evaluate(),
            Err(Error::InsufficientClusters { found: 0 })
        );
    }

    #[test]
    fn test_failed_run_keeps_previous_labels() {
        let points = two_groups();
        let mut clusterer = LocationClusterer::new(&points);

        clusterer.cluster(meters_to_angular(200.0), 2).unwrap();
        assert!(clusterer.cluster(0.0, 2).is_err());
        assert_eq!(clusterer.labels(), Some(&[0, 0, 0, 1, 1, 1][..]));
    }

    #[test]
    fn test_distance_stats_through_clusterer() {
        let points: Vec<Point> = two_groups();
        let clusterer = LocationClusterer::new(&points);
        let mut rng = StdRng::seed_from_u64(3);

        let stats = clusterer.distance_stats(points.len(), &mut rng).unwrap();
        assert_eq!(stats.min, 0.0);
        assert!(stats.max > 5000.0 && stats.max < 5100.0);

        assert_eq!(
            clusterer.distance_stats(7, &mut rng),
            Err(Error::InsufficientData {
                requested: 7,
                available: 6
            })
        );
    }
}
