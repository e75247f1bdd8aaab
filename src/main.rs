use lib_game::{GameSession, InputModel, WINDOW_HEIGHT, WINDOW_WIDTH, sys};
use macroquad::prelude::*;
use quad_dbg::{Debug, ScreenDump, dump};

use assets::Assets;
use render::Render;

mod assets;
mod render;
mod ui;

fn window_conf() -> Conf {
    Conf {
        window_title: "Alien Buster".to_owned(),
        window_width: WINDOW_WIDTH as i32,
        window_height: WINDOW_HEIGHT as i32,
        window_resizable: false,
        fullscreen: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        sys::panic_screen(&format!("Driver panicked:\n{}", info));
        hook(info);
    }));

    if let Err(e) = run().await {
        error!("Driver exited with error: {:?}", e);
        sys::panic_screen(&format!("Driver exitted with error:\n{:?}", e));
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    quad_dbg::init_on_screen_log()?;
    prevent_quit();

    info!("Project version: {}", env!("CARGO_PKG_VERSION"));

    let assets = Assets::load().await;
    let seed = (macroquad::miniquad::date::now() * 1000.0) as u64;
    let mut session = GameSession::new(seed, assets.object_base_sizes());
    let mut render = Render::new(assets);
    let mut debug = Debug::new();

    let mut fullscreen = window_conf().fullscreen;
    // Save old size as leaving fullscreen will give window a different size
    // This value is our best bet as macroquad doesn't allow us to get window size
    let old_size = (window_conf().window_width, window_conf().window_height);

    sys::done_loading();

    info!("Done loading");

    loop {
        ScreenDump::new_frame();

        let input = InputModel::capture(render.camera());
        if input.quit_requested {
            info!("Quit requested");
            break;
        }

        if input.fullscreen_toggle_requested {
            // NOTE: macroquad does not update window config when it goes fullscreen
            set_fullscreen(!fullscreen);

            if fullscreen {
                macroquad::miniquad::window::set_window_size(old_size.0 as u32, old_size.1 as u32);
            }

            fullscreen = !fullscreen;
        }

        if input.debug_toggle_requested {
            debug.toggle();
        }

        if let Some(click) = input.click {
            session.handle_click(click);
        }
        session.update(get_frame_time());
        for event in session.drain_events() {
            render.on_event(event);
        }

        render.draw(&session);

        if debug.enabled() {
            let powerup = session.powerup();
            dump!("FPS: {}", get_fps());
            dump!("state: {:?}", session.state());
            dump!("objects: {}", session.object_count());
            dump!(
                "difficulty: x{:.3} ({} clicks)",
                session.difficulty().speed_multiplier(),
                session.difficulty().click_count()
            );
            dump!(
                "powerup: {:?} idle {:.1}s active {:.1}s",
                powerup.phase(),
                powerup.idle_timer(),
                powerup.active_timer()
            );
        }
        debug.draw();

        next_frame().await
    }

    Ok(())
}
