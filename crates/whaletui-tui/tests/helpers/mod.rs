use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;
use whaletui_config::GlobalConfig;
use whaletui_core::test_support::{mock_container, MockProvider};
use whaletui_provider::{ContainerStatus, ProviderType};
use whaletui_tui::App;

pub const RUNNING_ID: &str = "aaaa1111bbbb2222cccc";
pub const EXITED_ID: &str = "dddd3333eeee4444ffff";
pub const CREATED_ID: &str = "0000555566667777aaaa";

/// Mock provider listing a running, an exited and a created container
#[allow(dead_code)]
pub fn mock_provider() -> Arc<MockProvider> {
    Arc::new(MockProvider::with_containers(
        ProviderType::Docker,
        vec![
            mock_container(RUNNING_ID, "web", ContainerStatus::Running),
            mock_container(EXITED_ID, "db", ContainerStatus::Exited),
            mock_container(CREATED_ID, "worker", ContainerStatus::Created),
        ],
    ))
}

/// App loaded from `mock`
#[allow(dead_code)]
pub async fn app_with(mock: &Arc<MockProvider>) -> App {
    App::new(mock.clone(), GlobalConfig::default())
        .await
        .unwrap()
}

/// Render the app to a TestBackend and capture output as a string
#[allow(dead_code)]
pub fn render_app(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| whaletui_tui::ui::draw(frame, app))
        .unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer_to_string(&buffer)
}

/// Convert a ratatui buffer to a string representation
#[allow(dead_code)]
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            let cell = buffer.get(x, y);
            output.push_str(cell.symbol());
        }
        output.push('\n');
    }
    output
}
