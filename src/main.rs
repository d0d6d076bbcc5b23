#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::{
        thread,
        time::{
            Duration,
            Instant,
        },
    };
    use anyhow::Context;
    use bui::renderer;
    use clap::Parser;
    use log::{error, info, warn};
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };
    use winit::{
        event::{
            ElementState,
            Event,
            KeyboardInput,
            VirtualKeyCode,
            WindowEvent,
        },
        event_loop::ControlFlow,
    };

    use particle_field::{
        gpu::FieldPipeline,
        mesh::MeshSurface,
        Animator,
        Error,
        FieldConfig,
        Frame,
        RecordingSurface,
    };

    #[derive(Parser, Debug)]
    #[command(name = "particle-field", about = "Drifting, interlinked particles as an animated background")]
    struct Args {
        /// Seed for particle placement; random when omitted.
        #[arg(long)]
        seed: Option<u64>,
        /// Upper bound on frames per second in the window.
        #[arg(long, default_value_t = 60)]
        max_fps: u32,
        /// Render this many frames off-screen and exit instead of opening a window.
        #[arg(long, value_name = "FRAMES")]
        headless: Option<u64>,
        /// Off-screen surface width.
        #[arg(long, default_value_t = 800.0)]
        width: f32,
        /// Off-screen surface height.
        #[arg(long, default_value_t = 600.0)]
        height: f32,
    }

    pub fn main() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        match args.headless {
            Some(frames) => run_headless(&args, frames, rng),
            None => run_window(&args, rng),
        }
    }

    fn run_headless(args: &Args, frames: u64, mut rng: StdRng) -> anyhow::Result<()> {
        let surface = RecordingSurface::new(args.width, args.height);
        let mut animator = Animator::new(surface, FieldConfig::default(), &mut rng)
            .context("failed to set up off-screen animation")?;
        animator.start();

        let timer = Instant::now();
        let drawn = animator.run_frames(frames);
        animator.stop();

        let surface = animator.surface();
        info!(
            "rendered {} frames in {:?}: {} discs, {} links",
            drawn,
            timer.elapsed(),
            surface.discs,
            surface.lines,
        );
        Ok(())
    }

    fn run_window(args: &Args, mut rng: StdRng) -> anyhow::Result<()> {
        let event_loop = winit::event_loop::EventLoop::new();
        let window = winit::window::WindowBuilder::new()
            .with_title("Particle Field")
            .build(&event_loop)
            .map_err(|e| Error::Window(e.to_string()))?;
        let mut renderer = futures::executor::block_on(renderer::Renderer::new(&window));
        let mut pipeline = FieldPipeline::new(renderer.device(), renderer.config().format);

        let size = window.inner_size();
        let surface = MeshSurface::new(size.width as f32, size.height as f32);
        let mut animator = Animator::new(surface, FieldConfig::default(), &mut rng)
            .context("failed to set up window animation")?;
        animator.start();

        let frame_budget = Duration::from_secs_f32(1.0/args.max_fps.max(1) as f32);
        let mut last_frame_time = Instant::now();
        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Wait;

            match event {
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested
                        | WindowEvent::KeyboardInput {
                            input: KeyboardInput {
                                state: ElementState::Pressed,
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                ..
                            },
                            ..
                        } => {
                            animator.stop();
                            *control_flow = ControlFlow::Exit
                        },
                        WindowEvent::Resized(physical_size) => {
                            renderer.resize(*physical_size);
                            animator.resize(physical_size.width as f32, physical_size.height as f32);
                        },
                        WindowEvent::ScaleFactorChanged {
                            new_inner_size,
                            ..
                        } => {
                            renderer.resize(**new_inner_size);
                            animator.resize(new_inner_size.width as f32, new_inner_size.height as f32);
                        },
                        _ => {}
                    }
                },
                Event::RedrawRequested(_) => {
                    if let Frame::Stopped = animator.frame() {
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    pipeline.upload(renderer.device(), renderer.queue(), animator.surface().vertices());

                    match renderer.surface().get_current_texture() {
                        Ok(surface_texture) => {
                            let view = surface_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
                            let mut encoder = renderer.device().create_command_encoder(&wgpu::CommandEncoderDescriptor {
                                label: Some("Particle field encoder"),
                            });
                            pipeline.render(&mut encoder, &view);
                            renderer.queue().submit(std::iter::once(encoder.finish()));
                            surface_texture.present();
                        },
                        Err(wgpu::SurfaceError::Lost) => {
                            warn!("surface lost, reconfiguring");
                            renderer.reconfigure();
                        },
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("out of GPU memory, stopping");
                            animator.stop();
                            *control_flow = ControlFlow::Exit;
                            return;
                        },
                        Err(e) => {
                            warn!("skipping frame: {:?}", e);
                        },
                    };
                    thread::sleep(frame_budget.saturating_sub(last_frame_time.elapsed()));
                    last_frame_time = Instant::now();
                    window.request_redraw();
                },
                _ => ()
            }
        })
    }
}
