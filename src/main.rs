use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let _log_path = stt_helper::init_logger().ok();

    let mut args = std::env::args().skip(1);
    let Some(wav_file) = args.next() else {
        eprintln!("Usage: stt-helper <audio.wav>");
        return ExitCode::from(1);
    };

    let path = Path::new(&wav_file);
    if !path.exists() {
        eprintln!("ERROR: File not found: {}", wav_file);
        return ExitCode::from(1);
    }

    // Silence is a successful outcome: empty stdout, exit 0.
    let transcriber = stt_helper::Transcriber::from_env();
    if let Some(transcript) = transcriber.transcribe(path).await {
        println!("{}", transcript);
    }

    ExitCode::SUCCESS
}
