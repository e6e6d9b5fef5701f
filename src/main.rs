// dunescape: a procedural desert diorama

// Module declarations
mod camera;
mod creatures;
mod gen;
mod math;
mod mesh;
mod renderer;
mod scene;
mod world;

use winit::event_loop::EventLoop;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Create event loop
    let event_loop = EventLoop::new().expect("Failed to create event loop");

    // Create renderer
    let renderer = renderer::Renderer::new(&event_loop).await;

    // Run the renderer
    renderer.run(event_loop);
}
