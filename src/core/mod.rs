// ─── Skin Pack Core ───
// Username → skin resolution and offline skin resource-pack assembly.
//
// Architecture:
//   core/
//     username    Account name syntax gate
//     resolver/   Account lookup, session profile, image fetch, trace
//     http        reqwest-backed upstream transport
//     skin/       PNG validation + pack icon
//     pack/       Version catalog, pack.mcmeta, zip assembly
//     state/      Settings, per-user session, shared server state

pub mod error;
pub mod http;
pub mod pack;
pub mod resolver;
pub mod skin;
pub mod state;
pub mod username;
