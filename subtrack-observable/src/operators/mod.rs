// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod delay;
mod share_replay;
mod take_until;

pub use share_replay::ShareReplayConfig;
