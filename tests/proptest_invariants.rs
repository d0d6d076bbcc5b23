use particle_field::{link_alpha, particle::advance, Particle};
use proptest::prelude::*;

fn particle() -> impl Strategy<Value = Particle> {
    (0.0f32..1000.0, 0.0f32..1000.0, -0.5f32..0.5, -0.5f32..0.5).prop_map(|(x, y, vx, vy)| Particle {
        x,
        y,
        size: 2.0,
        vx,
        vy,
        opacity: 0.5,
    })
}

proptest! {
    #[test]
    fn advance_stays_on_surface(
        start in particle(),
        width in 1.0f32..1000.0,
        height in 1.0f32..1000.0,
        steps in 1usize..200,
    ) {
        let mut p = Particle { x: start.x % width, y: start.y % height, ..start };
        for _ in 0..steps {
            advance(&mut p, width, height);
            prop_assert!(p.x >= 0.0 && p.x <= width);
            prop_assert!(p.y >= 0.0 && p.y <= height);
        }
        prop_assert_eq!((p.vx, p.vy), (start.vx, start.vy));
    }

    #[test]
    fn link_is_symmetric(a in particle(), b in particle()) {
        prop_assert_eq!(link_alpha(&a, &b, 120.0, 0.15), link_alpha(&b, &a, 120.0, 0.15));
    }

    #[test]
    fn link_alpha_is_bounded(a in particle(), b in particle()) {
        if let Some(alpha) = link_alpha(&a, &b, 120.0, 0.15) {
            prop_assert!((0.0..=0.15).contains(&alpha));
        }
    }
}
