//! Minimal embedding: build a registry, load a document, settle the
//! layout and print where everything landed.

use std::collections::HashMap;
use veneer::{Bounds, Element, Monospace, Point, Registry, Session};

const MAIN: &str = r##"
<stack width="match_parent" height="match_content" padding="8" background="#202830">
    <text width="match_content" height="match_content" text="veneer"/>
    <button width="match_content" height="match_content" text="quit" on-click="quit"/>
</stack>
"##;

fn main() {
    let mut registry = Registry::with_builtins();
    registry.register_callback("quit", |_target| {
        println!("clicked!");
        Ok(())
    });

    let mut docs = HashMap::new();
    docs.insert("main.xml".to_string(), MAIN.to_string());

    let session = Session::new(
        registry,
        Box::new(docs),
        Box::new(Monospace {
            advance: 8.0,
            line_height: 16.0,
        }),
        "main.xml",
        Bounds::new(Point::new(0.0, 0.0), Point::new(640.0, 480.0)),
    )
    .unwrap();

    session.layout().unwrap();
    session.draw();

    session.with_root(|root| {
        println!("root: {:?}", root.common().bounds().unwrap());
        let layout = root.as_layout().unwrap();
        for index in 0..layout.child_count() {
            let child = layout.child(index);
            println!(
                "  {}: {:?}",
                child.common().display_name(),
                child.common().bounds().unwrap()
            );
        }
    });
}
