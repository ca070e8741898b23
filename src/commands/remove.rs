use anyhow::Result;
use owo_colors::OwoColorize;

use crate::store::{EventApi, EventStore};

use super::create_spinner;

pub async fn run<A: EventApi>(store: &mut EventStore<A>, id: String) -> Result<()> {
    let spinner = create_spinner("이벤트를 삭제하는 중…".to_string());
    let result = store.delete(&id).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            println!("{}", format!("  삭제됨: {id}").green());
            Ok(())
        }
        Err(e) => {
            eprintln!("  {}", e.to_string().red());
            anyhow::bail!("이벤트를 삭제하지 못했습니다")
        }
    }
}
