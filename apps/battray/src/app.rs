use std::time::Instant;

use battray_core::{IconFrame, RefreshCycle};
use color_eyre::eyre;
use color_eyre::eyre::Result;
use tray_icon::{
	TrayIcon, TrayIconBuilder, TrayIconEvent,
	menu::{Menu, MenuEvent, MenuId, MenuItem},
};
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::{
	application::ApplicationHandler,
	event_loop::{ActiveEventLoop, ControlFlow, EventLoopProxy},
	window::WindowId,
};

use crate::icon;

pub enum UserEvent {
	TrayIcon(TrayIconEvent),
	Menu(MenuEvent),
}

struct App {
	cycle: RefreshCycle,
	tray_icon: Option<TrayIcon>,
	quit_menu_id: Option<MenuId>,
}
impl App {
	fn new(cycle: RefreshCycle) -> Self {
		Self { cycle, tray_icon: None, quit_menu_id: None }
	}

	fn install_tray(&mut self, event_loop: &ActiveEventLoop) {
		if self.tray_icon.is_some() {
			return;
		}

		let tray_menu = Menu::new();
		let quit_item = MenuItem::new("Quit", true, None);

		if let Err(err) = tray_menu.append(&quit_item) {
			tracing::warn!(error = ?err, "Failed to build tray menu.");

			event_loop.exit();

			return;
		}

		let frame = self.cycle.refresh(Instant::now());
		let icon = match icon::tray_icon_from_pixels(&frame.pixels) {
			Ok(icon) => icon,
			Err(err) => {
				tracing::warn!(error = ?err, "Failed to create tray icon image.");

				event_loop.exit();

				return;
			},
		};
		let tray_icon = match TrayIconBuilder::new()
			.with_tooltip(&frame.tooltip)
			.with_menu(Box::new(tray_menu))
			.with_icon(icon)
			.build()
		{
			Ok(icon) => icon,
			Err(err) => {
				tracing::warn!(error = ?err, "Failed to build tray icon.");

				event_loop.exit();

				return;
			},
		};

		tracing::info!(tooltip = %frame.tooltip, "Tray icon installed.");

		self.quit_menu_id = Some(quit_item.id().clone());
		self.tray_icon = Some(tray_icon);
	}

	fn apply_frame(&self, frame: &IconFrame) {
		let Some(tray_icon) = self.tray_icon.as_ref() else {
			return;
		};

		match icon::tray_icon_from_pixels(&frame.pixels) {
			Ok(icon) => {
				if let Err(err) = tray_icon.set_icon(Some(icon)) {
					tracing::warn!(error = ?err, "Failed to update tray icon.");
				}
			},
			Err(err) => tracing::warn!(error = ?err, "Failed to create tray icon image."),
		}

		if let Err(err) = tray_icon.set_tooltip(Some(&frame.tooltip)) {
			tracing::warn!(error = ?err, "Failed to update tray tooltip.");
		}
	}

	fn quit(&mut self, event_loop: &ActiveEventLoop) {
		// Dropping the handle removes the icon from the tray.
		self.tray_icon = None;

		event_loop.exit();
	}
}

impl ApplicationHandler<UserEvent> for App {
	fn resumed(&mut self, event_loop: &ActiveEventLoop) {
		self.install_tray(event_loop);
	}

	fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
		match event {
			UserEvent::Menu(event) => {
				let id = event.id();

				if Some(id) == self.quit_menu_id.as_ref() {
					tracing::info!("Quit requested from tray menu.");

					self.quit(event_loop);
				} else {
					tracing::warn!(menu_id = ?id.as_ref(), "Ignoring unknown menu event.");
				}
			},

			UserEvent::TrayIcon(_) => {},
		}
	}

	fn window_event(
		&mut self,
		event_loop: &ActiveEventLoop,
		_window_id: WindowId,
		event: WindowEvent,
	) {
		if let WindowEvent::CloseRequested = event {
			self.quit(event_loop);
		}
	}

	fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
		if self.tray_icon.is_some()
			&& let Some(frame) = self.cycle.poll(Instant::now())
		{
			self.apply_frame(&frame);
		}

		event_loop.set_control_flow(ControlFlow::WaitUntil(self.cycle.next_due()));
	}
}

pub fn run(cycle: RefreshCycle) -> Result<()> {
	let mut event_loop_builder = winit::event_loop::EventLoop::<UserEvent>::with_user_event();

	#[cfg(target_os = "macos")]
	{
		use winit::platform::macos::{ActivationPolicy, EventLoopBuilderExtMacOS};

		event_loop_builder.with_activation_policy(ActivationPolicy::Accessory);
		event_loop_builder.with_activate_ignoring_other_apps(false);
		event_loop_builder.with_default_menu(false);
	}

	let event_loop = event_loop_builder.build()?;
	let tray_proxy: EventLoopProxy<UserEvent> = event_loop.create_proxy();
	let mut app = App::new(cycle);

	TrayIconEvent::set_event_handler(Some(move |event| {
		let _ = tray_proxy.send_event(UserEvent::TrayIcon(event));
	}));

	let menu_proxy: EventLoopProxy<UserEvent> = event_loop.create_proxy();

	MenuEvent::set_event_handler(Some(move |event| {
		let _ = menu_proxy.send_event(UserEvent::Menu(event));
	}));

	tracing::info!(
		interval_secs = app.cycle.interval().as_secs(),
		"Starting tray-only battray app."
	);

	event_loop.run_app(&mut app).map_err(|err: EventLoopError| eyre::eyre!(err))?;

	Ok(())
}
