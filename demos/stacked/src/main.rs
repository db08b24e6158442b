//! Headless walkthrough of the imperative modal API: create a modal through
//! the registry handle, mutate it, let the exit transition play, stack a
//! second instance, then tear everything down. Run with
//! `RUST_LOG=debug cargo run -p stacked` to see the registry's own logging.

use anyhow::Result;
use velum_core::*;
use velum_provider::{ModalHost, ModalRegistry};
use velum_ui::*;
use web_time::Duration;

fn app_content() -> View {
    Column(Modifier::new().fill_max_size().padding(16.0)).child((
        Text("Modal component demo").size(24.0),
        Text("press buttons in a real runner; this demo drives the handles directly"),
    ))
}

fn frame(registry: &ModalRegistry) -> View {
    let registry = registry.clone();
    compose_frame(move || ModalHost(&registry, app_content))
}

fn dump(v: &View, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = match &v.kind {
        ViewKind::Text { text, .. } => format!("Text {text:?}"),
        ViewKind::Button { text, .. } => format!("Button {text:?}"),
        other => format!("{other:?}"),
    };
    let mut notes = String::new();
    if let Some(a) = v.modifier.alpha {
        notes.push_str(&format!(" alpha={a:.2}"));
    }
    if let Some(s) = &v.modifier.semantics {
        notes.push_str(&format!(" role={:?}", s.role));
        if let Some(l) = &s.label {
            notes.push_str(&format!(" label={l:?}"));
        }
    }
    println!("{indent}{label}{notes}");
    for c in &v.children {
        dump(c, depth + 1);
    }
}

fn show(step: &str, registry: &ModalRegistry) {
    println!("\n== {step} ==");
    dump(&frame(registry), 0);
}

fn main() -> Result<()> {
    env_logger::init();

    // Drive time manually so every transition step is visible.
    let clock = TestClock::install();
    let registry = ModalRegistry::new();

    show("empty host", &registry);

    let instance = registry.create(
        ModalProps::new()
            .open(true)
            .width(500.0)
            .title(Text("Modal title using the handle"))
            .content(Text("Content will be changed shortly"))
            .after_close(|| log::info!("after_close fired")),
    );
    show("created (transition starting)", &registry);

    clock.advance(Duration::from_millis(500));
    show("fully entered", &registry);

    instance.update(|p| p.content = Some(Text("Content changed!!")));
    show("content updated in place", &registry);

    let second = registry.create(
        ModalProps::new()
            .open(true)
            .title(Text("Stacked on top"))
            .footer(Footer::None),
    );
    clock.advance(Duration::from_millis(500));
    show("two stacked instances", &registry);

    instance.close();
    show("first instance exit starting", &registry);

    clock.advance(Duration::from_millis(250));
    show("first instance mid-exit", &registry);

    clock.advance(Duration::from_millis(300));
    show("first instance exited (still registered)", &registry);

    println!("\nsnapshot: {}", registry.to_json());

    let _ = second.close();
    registry.destroy_all();
    show("destroyed all", &registry);

    Ok(())
}
