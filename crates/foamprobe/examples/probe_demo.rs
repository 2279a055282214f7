//! Walks through one viewer session against a dataset on disk.
//!
//! Usage: `cargo run --example probe_demo [options.json]`
//!
//! Without an options file the dataset is read from `./data`.

use foamprobe::*;

fn main() -> Result<()> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::from_json_file(path)?,
        None => Options::default(),
    };
    let controller = Controller::new(Scene::load(&options)?, options);
    let mut session = controller.new_session();

    println!("{}", serde_json::to_string_pretty(&controller.initial_scene())?);

    for value in controller.color_options() {
        let update = controller.on_color_change(&mut session, value.as_str())?;
        println!("{value}: {}", serde_json::to_string(&update)?);
    }

    // Hover over the first point of every part
    for mesh in controller.scene().vehicle().iter() {
        let Some(position) = mesh.point(0) else {
            continue;
        };
        let hover = HoverEvent::new(mesh.name(), position);
        let (tooltip, glyph) = controller.probe(Some(&hover));
        println!("{}:\n{tooltip}\n{}", mesh.name(), serde_json::to_string(&glyph)?);
    }

    let cleared = controller.on_hover(None);
    println!("{}", serde_json::to_string(&cleared)?);

    Ok(())
}
