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

use std::env;

#[tokio::main]
async fn main() {
    env_logger::init();
    let url = env::args()
        .nth(1)
        .expect("Usage: image-versions <glance root URL>");
    let config = osdiscovery::EndpointConfig::new(url).expect("Invalid endpoint URL");
    let glance = osdiscovery::Glance::new(config);

    for version in glance.versions().await.expect("Failed to list versions") {
        println!("{} {}", version.id, version.status.as_str());
    }

    match glance.version().await {
        Ok(version) => println!("Supported version is {}", version.id),
        Err(e) => panic!("Failed: {}", e),
    }

    let endpoint = glance
        .service_endpoint()
        .await
        .expect("Failed to resolve the endpoint");
    println!("Image API endpoint is {}", endpoint);
}
