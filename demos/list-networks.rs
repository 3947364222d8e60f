// Copyright 2021 Dmitry Tantsur <dtantsur@protonmail.com>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#[tokio::main]
async fn main() {
    env_logger::init();
    let os = osdiscovery::OpenStack::from_env()
        .expect("Failed to load the cloud named by OS_CLOUD");

    let networks = os.network_list().await.expect("Failed to list networks");
    for net in networks {
        println!(
            "ID = {}, Name = {}, Shared = {}",
            net.id,
            net.name.as_deref().unwrap_or("-"),
            net.shared
        );
    }
    println!("Done listing");
}
