//! Core application state and lifecycle.

use kurbo::{Point, Size};
use peniko::Color;
use polydraw_core::controller::SceneController;
use polydraw_core::input::{InputState, MouseButton as PointerButton, PointerEvent};
use polydraw_render::{GridStyle, RenderContext, RenderResult, Renderer, RendererError, VelloRenderer};
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use crate::shortcuts::ShortcutRegistry;
use crate::ui::{render_ui, UiState};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// When frames are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedrawPolicy {
    /// Request a new frame after every presented frame.
    #[default]
    Continuous,
    /// Render only when the scene or the overlay changed.
    OnDemand,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub grid_style: GridStyle,
    pub background_color: Color,
    pub redraw_policy: RedrawPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "PolyDraw".to_string(),
            width: 1280,
            height: 800,
            grid_style: GridStyle::Lines,
            background_color: Color::WHITE,
            redraw_policy: RedrawPolicy::Continuous,
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    shape_renderer: VelloRenderer,
    /// Converts the Rgba8Unorm render target to the surface format.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // State
    controller: SceneController,
    input: InputState,
    modifiers: ModifiersState,
    config: AppConfig,
}

impl AppState {
    /// Ask for another frame if the policy and the controller call for one.
    fn schedule_redraw(&mut self) {
        let requested = self.controller.take_render_request();
        if requested || self.config.redraw_policy == RedrawPolicy::Continuous {
            self.window.request_redraw();
        }
    }

    /// Run the overlay, build the scene and present one frame.
    fn render_frame(&mut self, render_cx: &vello::util::RenderContext) -> RenderResult<()> {
        let ui_state = UiState::from_controller(&self.controller);
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut ui_action = None;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            ui_action = render_ui(ctx, &ui_state);
        });

        if let Some(action) = ui_action {
            log::debug!("UI action: {:?}", action);
            self.controller.handle_command(action.command());
        }

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let viewport_size = Size::new(
            f64::from(self.surface.config.width),
            f64::from(self.surface.config.height),
        );
        let ctx = RenderContext::new(&self.controller, viewport_size)
            .with_background(self.config.background_color)
            .with_grid(self.config.grid_style);
        self.shape_renderer.build_scene(&ctx);
        let base_color = self.shape_renderer.background_color(&ctx);
        let scene = self.shape_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(e.to_string()))?;

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a StorageBinding target, which is only
        // available for Rgba8Unorm. The result is blitted onto the surface.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        self.vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });

            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        // Keep the Vello content underneath the overlay.
                        load: vello::wgpu::LoadOp::Load,
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu requires a 'static render pass.
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        // Status line reflects the action on the next frame.
        if ui_action.is_some() {
            self.controller.request_render();
        }
        Ok(())
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Fatal error raised inside the event loop, reported by `run`.
    error: Option<AppError>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            error: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;
        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Create the window, surface, renderers and controller.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let size = window.inner_size();
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            size.width,
            size.height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let controller = SceneController::new(Size::new(
            f64::from(surface.config.width),
            f64::from(surface.config.height),
        ));

        log::info!(
            "PolyDraw initialized - {}x{}",
            surface.config.width,
            surface.config.height
        );
        log::info!(
            "Grid: {}, redraw policy: {:?}",
            self.config.grid_style.name(),
            self.config.redraw_policy
        );
        log::info!("Keyboard shortcuts:");
        ShortcutRegistry::log_all();

        window.request_redraw();
        self.state = Some(AppState {
            window,
            surface,
            vello_renderer,
            shape_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            controller,
            input: InputState::new(),
            modifiers: ModifiersState::empty(),
            config: self.config.clone(),
        });
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            log::error!("Initialization failed: {err}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        let egui_wants_input = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input()
            || state.egui_ctx.wants_keyboard_input();

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
                return;
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                state
                    .controller
                    .resize(Size::new(f64::from(size.width), f64::from(size.height)));

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                match state.render_frame(render_cx) {
                    Ok(()) => {}
                    Err(RendererError::Surface(e)) => {
                        log::warn!("Failed to get surface texture: {e}");
                    }
                    Err(e) => log::error!("Failed to render: {e}"),
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = PointerEvent::Move {
                    position: Point::new(position.x, position.y),
                };
                state.input.handle_pointer_event(event);

                // Skip canvas processing if egui wants the pointer
                if !egui_wants_input {
                    state.controller.handle_pointer_event(event);
                }
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                // Skip canvas processing if egui wants the pointer
                if egui_wants_input {
                    return;
                }

                let pointer_btn = match button {
                    MouseButton::Left => PointerButton::Left,
                    MouseButton::Right => PointerButton::Right,
                    MouseButton::Middle => PointerButton::Middle,
                    _ => return,
                };
                let event = state.input.press(pointer_btn);
                state.controller.handle_pointer_event(event);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if egui_wants_input || event.state != ElementState::Pressed || event.repeat {
                    return;
                }

                let command = ShortcutRegistry::command_for_key(
                    &event.logical_key,
                    state.modifiers.control_key(),
                    state.modifiers.shift_key(),
                );
                if let Some(command) = command {
                    log::debug!("Shortcut: {:?}", command);
                    state.controller.handle_command(command);
                }
            }

            _ => {}
        }

        state.schedule_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.title, "PolyDraw");
        assert_eq!((config.width, config.height), (1280, 800));
        assert_eq!(config.grid_style, GridStyle::Lines);
        assert_eq!(config.background_color, Color::WHITE);
        assert_eq!(config.redraw_policy, RedrawPolicy::Continuous);
    }

    #[test]
    fn test_app_starts_uninitialized() {
        let app = App::with_config(AppConfig {
            redraw_policy: RedrawPolicy::OnDemand,
            ..AppConfig::default()
        });
        assert!(app.state.is_none());
        assert!(app.render_cx.is_none());
        assert!(app.error.is_none());
        assert_eq!(app.config.redraw_policy, RedrawPolicy::OnDemand);
    }

    #[test]
    fn test_renderer_error_converts() {
        let err: AppError = RendererError::InitFailed("no adapter".to_string()).into();
        assert_eq!(err.to_string(), "Initialization failed: no adapter");
    }
}
