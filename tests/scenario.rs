use particle_field::{
    field::{LINK_DISTANCE, PARTICLE_COUNT},
    Animator, DrawCommand, DrawSurface, FieldConfig, Frame, Particle, ParticleField, RecordingSurface,
};
use rand::{rngs::StdRng, SeedableRng};

fn assert_on_surface(animator: &Animator<RecordingSurface>) {
    let (width, height) = animator.surface().size();
    for p in animator.field().particles() {
        assert!((0.0..=width).contains(&p.x), "x = {} outside 0..={}", p.x, width);
        assert!((0.0..=height).contains(&p.y), "y = {} outside 0..={}", p.y, height);
    }
}

#[test]
fn thousand_frames_keep_population_and_bounds() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut animator = Animator::new(RecordingSurface::new(800.0, 600.0), FieldConfig::default(), &mut rng).unwrap();
    animator.start();
    let fixed = |a: &Animator<RecordingSurface>| -> Vec<_> {
        a.field().particles().iter().map(|p| (p.size, p.vx, p.vy, p.opacity)).collect()
    };
    let spawned = fixed(&animator);

    let mut frames_with_links = 0;
    for _ in 0..1000 {
        match animator.frame() {
            Frame::Drawn { links } => {
                if links > 0 {
                    frames_with_links += 1;
                }
            }
            Frame::Stopped => panic!("animator stopped on its own"),
        }
        assert_eq!(animator.field().len(), PARTICLE_COUNT);
        assert_on_surface(&animator);

        let surface = animator.surface();
        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_eq!(surface.frame_discs().count(), PARTICLE_COUNT);
    }

    assert_eq!(animator.frames(), 1000);
    assert_eq!(fixed(&animator), spawned);
    assert!(frames_with_links > 0);
    assert!(animator.surface().lines > 0);
}

#[test]
fn links_only_between_close_pairs() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut animator = Animator::new(RecordingSurface::new(800.0, 600.0), FieldConfig::default(), &mut rng).unwrap();
    animator.start();
    animator.run_frames(20);

    for command in animator.surface().frame_lines() {
        if let DrawCommand::Line { from, to, width, color } = command {
            let distance = ((from[0] - to[0]).powi(2) + (from[1] - to[1]).powi(2)).sqrt();
            assert!(distance < LINK_DISTANCE);
            assert_eq!(*width, 1.0);
            assert!((0.0..=0.15).contains(&color.a));
        }
    }
}

#[test]
fn resizes_never_change_population() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut animator = Animator::new(RecordingSurface::new(800.0, 600.0), FieldConfig::default(), &mut rng).unwrap();
    animator.start();

    for (i, (w, h)) in [(300.0, 200.0), (1920.0, 1080.0), (50.0, 50.0), (800.0, 600.0)].into_iter().enumerate() {
        animator.resize(w, h);
        animator.run_frames(10 + i as u64);
        assert_eq!(animator.field().len(), PARTICLE_COUNT);
        assert_on_surface(&animator);
    }
}

#[test]
fn shrinking_pulls_outliers_back_on_next_step() {
    let outlier = Particle { x: 700.0, y: 500.0, size: 2.0, vx: 0.1, vy: 0.1, opacity: 0.3 };
    let field = ParticleField::from_particles(FieldConfig::default(), vec![outlier]);
    let mut animator = Animator::with_field(RecordingSurface::new(800.0, 600.0), field);
    animator.start();

    animator.resize(100.0, 100.0);
    assert_eq!(animator.field().particles()[0].x, 700.0);

    animator.frame();
    let p = animator.field().particles()[0];
    assert_eq!((p.x, p.y), (0.0, 0.0));
}

#[test]
fn same_seed_same_frames() {
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut animator = Animator::new(RecordingSurface::new(640.0, 480.0), FieldConfig::default(), &mut rng).unwrap();
        animator.start();
        animator.run_frames(50);
        animator.surface().commands().to_vec()
    };
    assert_eq!(run(11), run(11));
}
