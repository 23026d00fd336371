use peer_sampling::{Descriptor, Torus2d, View};

#[test]
fn torus_3x4_neighbors_of_rank_0() {
    let topology = Torus2d::new(12).unwrap();
    assert_eq!((3, 4), topology.dimensions());

    let mut neighbors = topology.neighbors(0);
    neighbors.sort();
    assert_eq!(vec![1, 3, 4, 8], neighbors);
}

#[test]
fn torus_neighbors_seed_the_view() {
    let topology = Torus2d::new(12).unwrap();
    let mut view = View::new(0);
    view.init(&topology.neighbors(0));

    assert_eq!(4, view.size());
    let descriptors = view.descriptors();
    for rank in &[8, 4, 3, 1] {
        assert!(descriptors.contains(&Descriptor::with_age(*rank, 0)));
    }
}

#[test]
fn small_torus_neighbors_are_deduplicated() {
    let topology = Torus2d::new(4).unwrap();
    assert_eq!((2, 2), topology.dimensions());

    // on a 2x2 torus up == down and left == right
    let mut neighbors = topology.neighbors(0);
    neighbors.sort();
    assert_eq!(vec![1, 2], neighbors);
}

#[test]
fn prime_cohort_is_rejected() {
    assert!(Torus2d::new(7).is_err());
    assert!(Torus2d::new(13).is_err());
}

#[test]
fn tiny_cohort_is_rejected() {
    for n in 0..4 {
        assert!(Torus2d::new(n).is_err());
    }
}

#[test]
fn factoring_is_near_square() {
    assert_eq!((2, 3), Torus2d::new(6).unwrap().dimensions());
    assert_eq!((3, 3), Torus2d::new(9).unwrap().dimensions());
    assert_eq!((4, 5), Torus2d::new(20).unwrap().dimensions());
    assert_eq!((2, 11), Torus2d::new(22).unwrap().dimensions());
}

#[test]
fn neighbors_wrap_on_both_axes() {
    let topology = Torus2d::new(12).unwrap();

    // rank 11 sits at the bottom-right corner of the 3x4 grid
    let mut neighbors = topology.neighbors(11);
    neighbors.sort();
    assert_eq!(vec![3, 7, 8, 10], neighbors);
}
